//! Outcomes the handlers report back to the front end.

use client_core::FailureKind;
use shared::domain::{ActivityName, Email};

use crate::ui::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ActivitiesRendered {
        activities: usize,
    },
    ActivitiesLoadFailed {
        kind: FailureKind,
        reason: String,
    },
    /// A newer render started before this response arrived; it was dropped.
    RenderSuperseded {
        generation: u64,
    },
    UnregisterDeclined {
        activity: ActivityName,
        email: Email,
    },
    ParticipantRemoved {
        activity: ActivityName,
        email: Email,
        message: String,
    },
    UnregisterFailed {
        activity: ActivityName,
        email: Email,
        kind: FailureKind,
        alert: String,
    },
    /// The form's input constraints stopped the submit; nothing was sent.
    SignupInvalid {
        reason: FormError,
    },
    SignedUp {
        activity: ActivityName,
        email: Email,
        message: String,
    },
    SignupFailed {
        activity: ActivityName,
        email: Email,
        kind: FailureKind,
        message: String,
    },
}

impl UiEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ActivitiesLoadFailed { .. }
                | Self::UnregisterFailed { .. }
                | Self::SignupInvalid { .. }
                | Self::SignupFailed { .. }
        )
    }

    pub fn summary(&self) -> String {
        match self {
            Self::ActivitiesRendered { activities } => {
                format!("rendered {activities} activities")
            }
            Self::ActivitiesLoadFailed { reason, .. } => {
                format!("failed to load activities: {reason}")
            }
            Self::RenderSuperseded { generation } => {
                format!("dropped superseded render #{generation}")
            }
            Self::UnregisterDeclined { activity, email } => {
                format!("kept {email} in {activity}")
            }
            Self::ParticipantRemoved { message, .. } | Self::SignedUp { message, .. } => {
                message.clone()
            }
            Self::UnregisterFailed { alert, .. } => alert.clone(),
            Self::SignupInvalid { reason } => reason.to_string(),
            Self::SignupFailed { message, .. } => message.clone(),
        }
    }
}
