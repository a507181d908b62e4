//! Commands queued from the front end to the board runtime.

use shared::domain::{ActivityName, Email};

use crate::ui::SignupSubmission;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Page load or manual refresh.
    Load,
    /// A `delete-participant` control was activated.
    Unregister {
        activity: ActivityName,
        email: Email,
    },
    /// `#signup-form` was submitted; its values are read from the page.
    SubmitForm,
    /// A signup with values supplied directly.
    SubmitSignup(SignupSubmission),
}

impl BoardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unregister { .. } => "unregister",
            Self::SubmitForm => "submit_form",
            Self::SubmitSignup(_) => "submit_signup",
        }
    }
}
