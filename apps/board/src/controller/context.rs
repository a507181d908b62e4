use std::{sync::Arc, time::Duration};

use client_core::ActivitiesApi;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    dialogs::Dialogs,
    ui::{PageContext, StatusKind},
};

pub const STATUS_HIDE_AFTER: Duration = Duration::from_secs(5);

/// State shared by every handler: the service, the dialogs, and the page.
#[derive(Clone)]
pub struct BoardContext {
    api: Arc<dyn ActivitiesApi>,
    dialogs: Arc<dyn Dialogs>,
    page: Arc<Mutex<PageContext>>,
    status_hide_after: Duration,
}

impl BoardContext {
    pub fn new(api: Arc<dyn ActivitiesApi>, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            api,
            dialogs,
            page: Arc::new(Mutex::new(PageContext::new())),
            status_hide_after: STATUS_HIDE_AFTER,
        }
    }

    pub fn with_status_hide_after(mut self, status_hide_after: Duration) -> Self {
        self.status_hide_after = status_hide_after;
        self
    }

    pub fn api(&self) -> &dyn ActivitiesApi {
        self.api.as_ref()
    }

    /// Asks the dialogs for confirmation on the blocking pool, so a prompt
    /// waiting on the user never stalls a runtime worker. A dialog that
    /// panics counts as declined.
    pub async fn confirm(&self, prompt: String) -> bool {
        let dialogs = Arc::clone(&self.dialogs);
        match tokio::task::spawn_blocking(move || dialogs.confirm(&prompt)).await {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "confirmation dialog failed; treating as declined");
                false
            }
        }
    }

    pub async fn alert(&self, message: String) {
        let dialogs = Arc::clone(&self.dialogs);
        if let Err(error) = tokio::task::spawn_blocking(move || dialogs.alert(&message)).await {
            warn!(%error, "alert dialog failed");
        }
    }

    pub fn page(&self) -> &Arc<Mutex<PageContext>> {
        &self.page
    }

    pub fn status_hide_after(&self) -> Duration {
        self.status_hide_after
    }

    /// A copy of the page as it stands right now.
    pub async fn snapshot(&self) -> PageContext {
        self.page.lock().await.clone()
    }

    /// Shows `text` in the status region and schedules it to hide once the
    /// hide delay has passed, unless a newer message replaced it first.
    pub(crate) fn flash_status(
        &self,
        page: &mut PageContext,
        kind: StatusKind,
        text: impl Into<String>,
    ) {
        let generation = page.status.show(kind, text);
        let page = Arc::clone(&self.page);
        let delay = self.status_hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let hidden = page.lock().await.status.hide_if_current(generation);
            debug!(generation, hidden, "status hide timer fired");
        });
    }
}
