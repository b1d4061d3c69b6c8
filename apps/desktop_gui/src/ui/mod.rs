//! UI layer: app shell, screens, and small widgets.

pub mod app;
pub mod screens;
pub mod widgets;

pub use app::PopularApp;
