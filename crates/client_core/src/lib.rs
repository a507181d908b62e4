use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ActivityCatalog, ActivityName, Email},
    error::{ApiError, ApiException},
    protocol::{MessageResponse, ParticipantRequest},
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::{ClientError, ClientResult, FailureKind};

const ACTIVITIES_SEGMENT: &str = "activities";
const SIGNUP_SEGMENT: &str = "signup";
const UNREGISTER_SEGMENT: &str = "unregister";

/// The three calls the board makes against the activity service.
#[async_trait]
pub trait ActivitiesApi: Send + Sync {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog>;
    async fn signup(&self, activity: &ActivityName, email: &Email)
        -> ClientResult<MessageResponse>;
    async fn unregister(
        &self,
        activity: &ActivityName,
        email: &Email,
    ) -> ClientResult<MessageResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpActivitiesClient {
    http: Client,
    base_url: Url,
}

impl HttpActivitiesClient {
    pub fn new(server_url: &str) -> ClientResult<Self> {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(server_url.trim()).map_err(|e| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/activities[/{name}/{action}]`. Each segment is
    /// percent-encoded on its own, so names with `/`, spaces or `?` stay one
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidServerUrl {
                url: self.base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(ACTIVITIES_SEGMENT)
            .extend(segments);
        Ok(url)
    }

    fn roster_url(&self, activity: &ActivityName, action: &str) -> ClientResult<Url> {
        self.endpoint(&[activity.as_str(), action])
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<ParticipantRequest>,
    ) -> ClientResult<Response> {
        debug!(%method, %url, "activity service request");
        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn roster_mutation(
        &self,
        method: Method,
        activity: &ActivityName,
        email: &Email,
        action: &str,
    ) -> ClientResult<MessageResponse> {
        let url = self.roster_url(activity, action)?;
        let response = self
            .send(method, url, Some(ParticipantRequest::new(email.clone())))
            .await?;
        decode_response(response).await
    }
}

/// Reads the whole body, then decodes it as `T` on success or as the
/// `{"detail": ...}` failure shape otherwise.
async fn decode_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport {
            url: url.clone(),
            source,
        })?;

    if status.is_success() {
        return serde_json::from_slice(&body)
            .map_err(|source| ClientError::Decode { url, source });
    }

    let failure: ApiError =
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })?;
    let exception = ApiException::new(status.as_u16(), failure);
    warn!(
        %url,
        status = exception.status,
        detail = ?exception.detail,
        "activity service rejected request"
    );
    Err(exception.into())
}

#[async_trait]
impl ActivitiesApi for HttpActivitiesClient {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        let url = self.endpoint(&[])?;
        let response = self.send(Method::GET, url, None).await?;
        decode_response(response).await
    }

    async fn signup(
        &self,
        activity: &ActivityName,
        email: &Email,
    ) -> ClientResult<MessageResponse> {
        self.roster_mutation(Method::POST, activity, email, SIGNUP_SEGMENT)
            .await
    }

    async fn unregister(
        &self,
        activity: &ActivityName,
        email: &Email,
    ) -> ClientResult<MessageResponse> {
        self.roster_mutation(Method::DELETE, activity, email, UNREGISTER_SEGMENT)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
