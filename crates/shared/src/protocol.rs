use serde::{Deserialize, Serialize};

use crate::domain::Email;

/// Body of both `POST /activities/{name}/signup` and
/// `DELETE /activities/{name}/unregister`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRequest {
    pub email: Email,
}

impl ParticipantRequest {
    pub fn new(email: impl Into<Email>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Success body of the roster mutation endpoints. A success without a
/// `message` still counts as a success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
