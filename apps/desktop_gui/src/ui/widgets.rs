use eframe::egui;
use shared::domain::Movie;

use crate::controller::events::UiError;
use crate::controller::reducer::{StatusBanner, StatusSeverity};

pub fn movie_card(ui: &mut egui::Ui, movie: &Movie) {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&movie.title).strong().size(18.0));
            ui.add_space(4.0);
            ui.label(egui::RichText::new(&movie.overview).size(14.0));
        });
    ui.add_space(8.0);
}

/// Returns true when the user dismissed the banner.
pub fn status_banner(ui: &mut egui::Ui, banner: &StatusBanner) -> bool {
    let (fill, stroke) = match banner.severity {
        StatusSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
        StatusSeverity::Info => (
            egui::Color32::from_rgb(44, 74, 104),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(88, 132, 176)),
        ),
    };

    let mut dismissed = false;
    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

/// Error block for a failed screen load. Returns true when Retry was clicked.
pub fn load_error(ui: &mut egui::Ui, error: &UiError, allow_retry: bool) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new(error.headline())
                .strong()
                .color(ui.visuals().error_fg_color),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new(error.message()).weak());
        if allow_retry {
            ui.add_space(12.0);
            retry = ui.button("Retry").clicked();
        }
    });
    retry
}

pub fn loading(ui: &mut egui::Ui, what: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.spinner();
        ui.label(egui::RichText::new(format!("Loading {what}…")).weak());
    });
}

pub fn labeled_field(ui: &mut egui::Ui, id: &'static str, label: &str, value: &mut String) {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(label)
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 30.0], edit);
    ui.add_space(8.0);
}
