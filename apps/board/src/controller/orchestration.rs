//! Queueing UI actions onto the board command channel.

use thiserror::Error;
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::backend_bridge::commands::BoardCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("UI command queue is full; please retry")]
    QueueFull,
    #[error("board command processor stopped; restart the board")]
    Disconnected,
}

pub fn dispatch_board_command(
    cmd_tx: &Sender<BoardCommand>,
    cmd: BoardCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->board command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "board command queue full");
            Err(DispatchError::QueueFull)
        }
        Err(TrySendError::Closed(_)) => Err(DispatchError::Disconnected),
    }
}
