use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::navigation::Route;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{AppModel, UiAction};
use crate::ui::{screens, widgets};

const UI_EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct PopularApp {
    model: AppModel,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl PopularApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, page: u32) -> Self {
        let mut app = Self {
            model: AppModel::new(page),
            cmd_tx,
            ui_rx,
        };
        let initial = app.model.start();
        app.dispatch(initial);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn dispatch(&mut self, commands: Vec<BackendCommand>) {
        for cmd in commands {
            if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.model.apply_dispatch_failure(failure);
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.model.can_go_back(), egui::Button::new("⬅ Back"))
                    .clicked()
                {
                    actions.push(UiAction::Back);
                }
                let route = self.model.current_route();
                let title = match route {
                    Route::Home => format!("Popular Movies · page {}", self.model.page()),
                    other => other.label().to_string(),
                };
                ui.heading(title);
            });
            if let Some(banner) = self.model.status() {
                ui.add_space(4.0);
                if widgets::status_banner(ui, banner) {
                    actions.push(UiAction::DismissStatus);
                }
            }
            ui.add_space(6.0);
        });
    }
}

impl eframe::App for PopularApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            actions.push(UiAction::Back);
        }

        self.show_top_bar(ctx, &mut actions);

        egui::TopBottomPanel::bottom("bottom_nav").show(ctx, |ui| {
            ui.add_space(4.0);
            screens::bottom_nav(ui, &self.model, &mut actions);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.model.current_route() {
            Route::Home => screens::catalog_screen(ui, &self.model, &mut actions),
            Route::Profile => screens::profile_screen(ui, &self.model, &mut actions),
            Route::EditProfile => {
                screens::edit_profile_screen(ui, &mut self.model.edit_form, &mut actions)
            }
        });

        for action in actions {
            let commands = self.model.handle(action);
            self.dispatch(commands);
        }

        ctx.request_repaint_after(UI_EVENT_POLL_INTERVAL);
    }
}
