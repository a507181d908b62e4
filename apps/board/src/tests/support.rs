//! Test fixtures: an in-memory activity service reachable either directly
//! (as an `ActivitiesApi`) or over HTTP, and dialogs that record what they
//! were asked.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use client_core::{ActivitiesApi, ClientError, ClientResult};
use shared::{
    domain::{Activity, ActivityCatalog, ActivityDetails, ActivityName, Email},
    error::{ApiError, ApiException},
    protocol::{MessageResponse, ParticipantRequest},
};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{controller::BoardContext, dialogs::Dialogs};

pub const ACTIVITY_FULL: &str = "Activity full";

type Rejection = (u16, ApiError);

/// Server-side rules the board never enforces itself: unknown activities,
/// duplicate signups, capacity.
#[derive(Debug, Clone, Default)]
pub struct ActivityService {
    activities: Vec<Activity>,
}

impl ActivityService {
    pub fn with_activity(mut self, name: &str, max_participants: i64, participants: &[&str]) -> Self {
        self.activities.push(Activity {
            name: name.into(),
            details: ActivityDetails {
                description: format!("{name} description"),
                schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                max_participants,
                participants: participants.iter().map(|p| Email::from(*p)).collect(),
            },
        });
        self
    }

    pub fn catalog(&self) -> ActivityCatalog {
        ActivityCatalog::new(self.activities.clone())
    }

    pub fn participants(&self, name: &str) -> Vec<Email> {
        self.activities
            .iter()
            .find(|a| a.name.as_str() == name)
            .map(|a| a.details.participants.clone())
            .unwrap_or_default()
    }

    fn activity_mut(&mut self, name: &str) -> Result<&mut Activity, Rejection> {
        self.activities
            .iter_mut()
            .find(|a| a.name.as_str() == name)
            .ok_or((404, ApiError::new("Activity not found")))
    }

    pub fn signup(&mut self, name: &str, email: &Email) -> Result<MessageResponse, Rejection> {
        let activity = self.activity_mut(name)?;
        let participants = &mut activity.details.participants;
        if participants.contains(email) {
            return Err((400, ApiError::new("Student is already signed up")));
        }
        if participants.len() as i64 >= activity.details.max_participants {
            return Err((400, ApiError::new(ACTIVITY_FULL)));
        }
        participants.push(email.clone());
        Ok(MessageResponse::new(format!("Signed up {email} for {name}")))
    }

    pub fn unregister(&mut self, name: &str, email: &Email) -> Result<MessageResponse, Rejection> {
        let activity = self.activity_mut(name)?;
        let participants = &mut activity.details.participants;
        let Some(index) = participants.iter().position(|p| p == email) else {
            return Err((404, ApiError::new("Participant not found")));
        };
        participants.remove(index);
        Ok(MessageResponse::new(format!("Unregistered {email} from {name}")))
    }
}

fn rejected(rejection: Rejection) -> ClientError {
    let (status, body) = rejection;
    ClientError::Rejected(ApiException::new(status, body))
}

pub fn decode_error() -> ClientError {
    let source = serde_json::from_str::<ActivityCatalog>("[]").expect_err("arrays are not catalogs");
    ClientError::Decode {
        url: "http://fake/activities".to_string(),
        source,
    }
}

/// `ActivitiesApi` straight over an `ActivityService`, with call counters.
#[derive(Clone, Default)]
pub struct FakeApi {
    pub service: Arc<Mutex<ActivityService>>,
    pub list_calls: Arc<AtomicUsize>,
    pub mutation_calls: Arc<AtomicUsize>,
    fail_lists: Arc<AtomicBool>,
    bare_rejections: Arc<AtomicBool>,
    list_gates: Arc<Mutex<VecDeque<oneshot::Receiver<ActivityCatalog>>>>,
}

impl FakeApi {
    pub fn new(service: ActivityService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            ..Self::default()
        }
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Makes every signup and unregister fail with a 400 whose body has no
    /// `detail`.
    pub fn reject_without_detail(&self, reject: bool) {
        self.bare_rejections.store(reject, Ordering::SeqCst);
    }

    fn bare_rejection(&self) -> Option<ClientError> {
        self.bare_rejections
            .load(Ordering::SeqCst)
            .then(|| rejected((400, ApiError::default())))
    }

    /// The next `list_activities` call waits for, and returns, whatever is
    /// sent on the returned channel.
    pub fn gate_next_list(&self) -> oneshot::Sender<ActivityCatalog> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().expect("gates").push_back(rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivitiesApi for FakeApi {
    async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.list_gates.lock().expect("gates").pop_front();
        if let Some(gate) = gate {
            return gate.await.map_err(|_| decode_error());
        }
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(decode_error());
        }
        Ok(self.service.lock().expect("service").catalog())
    }

    async fn signup(
        &self,
        activity: &ActivityName,
        email: &Email,
    ) -> ClientResult<MessageResponse> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.bare_rejection() {
            return Err(error);
        }
        self.service
            .lock()
            .expect("service")
            .signup(activity.as_str(), email)
            .map_err(rejected)
    }

    async fn unregister(
        &self,
        activity: &ActivityName,
        email: &Email,
    ) -> ClientResult<MessageResponse> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.bare_rejection() {
            return Err(error);
        }
        self.service
            .lock()
            .expect("service")
            .unregister(activity.as_str(), email)
            .map_err(rejected)
    }
}

#[derive(Clone)]
pub struct HttpFixture {
    pub service: Arc<Mutex<ActivityService>>,
    pub requests: Arc<AtomicUsize>,
}

fn into_response(result: Result<MessageResponse, Rejection>) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err((status, body)) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
            (status, Json(body)).into_response()
        }
    }
}

async fn handle_list(State(fixture): State<HttpFixture>) -> Json<ActivityCatalog> {
    fixture.requests.fetch_add(1, Ordering::SeqCst);
    Json(fixture.service.lock().expect("service").catalog())
}

async fn handle_signup(
    State(fixture): State<HttpFixture>,
    Path(name): Path<String>,
    Json(body): Json<ParticipantRequest>,
) -> Response {
    fixture.requests.fetch_add(1, Ordering::SeqCst);
    let result = fixture
        .service
        .lock()
        .expect("service")
        .signup(&name, &body.email);
    into_response(result)
}

async fn handle_unregister(
    State(fixture): State<HttpFixture>,
    Path(name): Path<String>,
    Json(body): Json<ParticipantRequest>,
) -> Response {
    fixture.requests.fetch_add(1, Ordering::SeqCst);
    let result = fixture
        .service
        .lock()
        .expect("service")
        .unregister(&name, &body.email);
    into_response(result)
}

/// Serves `service` on an ephemeral local port.
pub async fn spawn_activity_server(service: ActivityService) -> anyhow::Result<(String, HttpFixture)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let fixture = HttpFixture {
        service: Arc::new(Mutex::new(service)),
        requests: Arc::new(AtomicUsize::new(0)),
    };
    let app = Router::new()
        .route("/activities", get(handle_list))
        .route("/activities/:name/signup", post(handle_signup))
        .route("/activities/:name/unregister", delete(handle_unregister))
        .with_state(fixture.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), fixture))
}

/// A base URL nothing is listening on.
pub fn closed_server_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

/// Answers every confirmation with a fixed value and records prompts and
/// alerts.
#[derive(Default)]
pub struct RecordingDialogs {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            ..Self::default()
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts").clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts").clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().expect("prompts").push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().expect("alerts").push(message.to_string());
    }
}

pub fn board(api: Arc<dyn ActivitiesApi>, dialogs: Arc<RecordingDialogs>) -> BoardContext {
    BoardContext::new(api, dialogs)
}
