//! One draw function per route, plus the bottom navigation bar.

use eframe::egui;

use crate::controller::events::UiErrorCategory;
use crate::controller::navigation::Route;
use crate::controller::reducer::{AppModel, LoadState, ProfileForm, UiAction};
use crate::ui::widgets;

pub fn catalog_screen(ui: &mut egui::Ui, model: &AppModel, actions: &mut Vec<UiAction>) {
    match model.catalog() {
        LoadState::Pending => widgets::loading(ui, "popular movies"),
        LoadState::Failed(error) => {
            let retryable = error.category() != UiErrorCategory::Configuration;
            if widgets::load_error(ui, error, retryable) {
                actions.push(UiAction::Retry);
            }
        }
        LoadState::Ready(_) => {
            egui::ScrollArea::vertical()
                .id_salt("catalog_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for movie in model.catalog_items() {
                        widgets::movie_card(ui, movie);
                    }
                });
        }
    }
}

pub fn profile_screen(ui: &mut egui::Ui, model: &AppModel, actions: &mut Vec<UiAction>) {
    if model.profile().is_pending() {
        widgets::loading(ui, "profile");
        return;
    }
    if let Some(error) = model.profile().error() {
        if widgets::load_error(ui, error, true) {
            actions.push(UiAction::Retry);
        }
        return;
    }
    let Some(profile) = model.displayed_profile() else {
        return;
    };

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.label(egui::RichText::new(&profile.name).strong().size(18.0));
        ui.label(egui::RichText::new(&profile.email).size(16.0));
        ui.label(egui::RichText::new(&profile.phone).size(16.0));
        ui.add_space(30.0);
        if ui.button(Route::EditProfile.label()).clicked() {
            actions.push(UiAction::Navigate(Route::EditProfile));
        }
    });
}

pub fn edit_profile_screen(ui: &mut egui::Ui, form: &mut ProfileForm, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(420.0);
        ui.add_space(ui.available_height() * 0.15);
        widgets::labeled_field(ui, "edit_profile_name", "Name", &mut form.name);
        widgets::labeled_field(ui, "edit_profile_email", "Email", &mut form.email);
        widgets::labeled_field(ui, "edit_profile_phone", "Phone", &mut form.phone);
        ui.add_space(12.0);
        if ui.button("Save").clicked() {
            actions.push(UiAction::SubmitProfile);
        }
    });
}

pub fn bottom_nav(ui: &mut egui::Ui, model: &AppModel, actions: &mut Vec<UiAction>) {
    ui.columns(Route::BOTTOM_NAV.len(), |columns| {
        for (column, route) in columns.iter_mut().zip(Route::BOTTOM_NAV) {
            column.vertical_centered(|ui| {
                let text = format!("{}\n{}", route.icon(), route.label());
                let button = egui::Button::new(text)
                    .selected(model.is_selected(route))
                    .min_size(egui::vec2(ui.available_width(), 44.0));
                if ui.add(button).clicked() {
                    actions.push(UiAction::Navigate(route));
                }
            });
        }
    });
}
