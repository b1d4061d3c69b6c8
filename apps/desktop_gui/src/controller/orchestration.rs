//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

/// Queues `cmd` for the worker. If it cannot be queued, returns the failure
/// event the model should apply in place of the missing result.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiEvent> {
    let cmd_name = cmd.name();
    let request = cmd.request().0;
    let context = cmd.context();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, request, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, request, "backend command queue full");
            Err(cmd.into_failure(UiError::from_message(
                context,
                "UI command queue is full; please retry",
            )))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, request, "backend worker is gone");
            Err(cmd.into_failure(UiError::from_message(
                context,
                "Backend command processor disconnected (possible startup/runtime failure); restart the app",
            )))
        }
    }
}
