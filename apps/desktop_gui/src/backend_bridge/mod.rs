//! Worker thread that owns the async runtime and the client, fed by the UI command queue.

pub mod commands;
pub mod runtime;
