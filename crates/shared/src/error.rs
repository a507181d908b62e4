use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure body of the activity endpoints: `{"detail": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }
}

/// A non-success response, with whatever detail the server supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("server rejected request with status {status}: {}", .detail.as_deref().unwrap_or("<no detail>"))]
pub struct ApiException {
    pub status: u16,
    pub detail: Option<String>,
}

impl ApiException {
    pub fn new(status: u16, body: ApiError) -> Self {
        Self {
            status,
            detail: body.detail.filter(|detail| !detail.is_empty()),
        }
    }

    /// The server's detail, or `fallback` when it sent none.
    pub fn detail_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self {
            detail: value.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_detail_falls_back() {
        let exception = ApiException::new(400, ApiError::new(""));
        assert_eq!(exception.detail_or("An error occurred"), "An error occurred");
    }

    #[test]
    fn missing_detail_field_decodes() {
        let body: ApiError = serde_json::from_str("{}").expect("decode");
        assert_eq!(body.detail, None);
    }

    #[test]
    fn display_names_status_and_detail() {
        let exception = ApiException::new(404, ApiError::new("Activity not found"));
        assert_eq!(
            exception.to_string(),
            "server rejected request with status 404: Activity not found"
        );
    }
}
