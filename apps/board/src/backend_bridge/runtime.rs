//! Runtime loop turning queued commands into handler calls.

use tokio::{
    sync::mpsc::{Receiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::debug;

use super::commands::BoardCommand;
use crate::controller::{
    render::render,
    roster::unregister,
    signup::{submit_form, submit_signup},
    BoardContext, UiEvent,
};

pub async fn execute(ctx: &BoardContext, cmd: BoardCommand) -> UiEvent {
    match cmd {
        BoardCommand::Load => render(ctx).await,
        BoardCommand::Unregister { activity, email } => {
            unregister(ctx, &email, &activity).await
        }
        BoardCommand::SubmitForm => submit_form(ctx).await,
        BoardCommand::SubmitSignup(submission) => submit_signup(ctx, submission).await,
    }
}

/// Runs every queued command on its own task, like event callbacks on a page:
/// a slow request never holds up the next action, and outcomes are reported
/// in completion order.
pub fn launch(
    ctx: BoardContext,
    mut cmd_rx: Receiver<BoardCommand>,
    ui_tx: UnboundedSender<UiEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let ctx = ctx.clone();
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let cmd_name = cmd.name();
                let event = execute(&ctx, cmd).await;
                debug!(command = cmd_name, event = %event.summary(), "board command finished");
                if ui_tx.send(event).is_err() {
                    debug!(command = cmd_name, "ui event receiver gone; dropping outcome");
                }
            });
        }
        debug!("board command queue closed");
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
