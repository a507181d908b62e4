//! Roster mutation handler behind every `delete-participant` control.

use client_core::{ClientError, FailureKind};
use shared::domain::{ActivityName, Email};
use tracing::{error, info};

use super::{context::BoardContext, events::UiEvent};

pub const UNREGISTER_FALLBACK: &str = "Failed to unregister participant";
pub const UNREGISTER_RETRY: &str = "Failed to unregister participant. Please try again.";

pub fn confirmation_prompt(email: &Email, activity: &ActivityName) -> String {
    format!("Unregister {email} from {activity}?")
}

/// Asks for confirmation, then unregisters `email` from `activity`.
///
/// On success only that participant's entry leaves the page; spots left is
/// not recomputed until the next full render.
pub async fn unregister(ctx: &BoardContext, email: &Email, activity: &ActivityName) -> UiEvent {
    if !ctx.confirm(confirmation_prompt(email, activity)).await {
        info!(%email, %activity, "unregister declined");
        return UiEvent::UnregisterDeclined {
            activity: activity.clone(),
            email: email.clone(),
        };
    }

    match ctx.api().unregister(activity, email).await {
        Ok(response) => {
            let removed = ctx
                .page()
                .lock()
                .await
                .remove_participant(activity.as_str(), email.as_str());
            info!(%email, %activity, removed, "participant unregistered");
            UiEvent::ParticipantRemoved {
                activity: activity.clone(),
                email: email.clone(),
                message: response.message,
            }
        }
        Err(ClientError::Rejected(rejection)) => {
            error!(
                %email,
                %activity,
                status = rejection.status,
                detail = ?rejection.detail,
                "failed to unregister"
            );
            let alert = rejection.detail_or(UNREGISTER_FALLBACK).to_string();
            ctx.alert(alert.clone()).await;
            UiEvent::UnregisterFailed {
                activity: activity.clone(),
                email: email.clone(),
                kind: FailureKind::Rejected,
                alert,
            }
        }
        Err(error) => {
            error!(%error, %email, %activity, "error unregistering participant");
            ctx.alert(UNREGISTER_RETRY.to_string()).await;
            UiEvent::UnregisterFailed {
                activity: activity.clone(),
                email: email.clone(),
                kind: error.kind(),
                alert: UNREGISTER_RETRY.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
