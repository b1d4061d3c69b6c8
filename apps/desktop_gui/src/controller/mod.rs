//! Controller layer: UI events, navigation, reducer-like state transitions, and command orchestration.

pub mod events;
pub mod navigation;
pub mod orchestration;
pub mod reducer;
