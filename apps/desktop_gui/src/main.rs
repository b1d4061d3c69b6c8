use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, SettingsOverrides};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PopularApp;

const APP_TITLE: &str = "Popular Movies";

#[derive(Parser, Debug)]
#[command(name = "popular-movies", about = "Browse popular movies and keep a local profile")]
struct Args {
    /// Catalog API key (overrides TMDB_API_KEY / popular.toml)
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    database_url: Option<String>,
    /// Directory for the default profile database
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page: Option<u32>,
}

impl From<Args> for SettingsOverrides {
    fn from(args: Args) -> Self {
        Self {
            api_key: args.api_key,
            api_base_url: args.api_base_url,
            database_url: args.database_url,
            data_dir: args.data_dir,
            page: args.page,
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings().apply(args.into());
    tracing::info!(?settings, "starting {APP_TITLE}");
    let page = settings.page;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let _worker = backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(PopularApp::new(cmd_tx, ui_rx, page)))),
    )
}
