//! Activity renderer: fetch the catalog, rebuild the cards and the select.

use shared::domain::ActivityCatalog;
use tracing::{debug, error, info};

use super::{context::BoardContext, events::UiEvent};
use crate::ui::{ActivityCard, PageContext};

/// Fetches every activity and redraws the list and the activity select.
///
/// Failures leave the static load-failure notice in place of the list and
/// are logged; they never propagate. A response that arrives after a newer
/// render has started is dropped.
pub async fn render(ctx: &BoardContext) -> UiEvent {
    let generation = ctx.page().lock().await.begin_render();
    let result = ctx.api().list_activities().await;

    let mut page = ctx.page().lock().await;
    if !page.is_current_render(generation) {
        debug!(generation, "dropping superseded activities response");
        return UiEvent::RenderSuperseded { generation };
    }

    match result {
        Ok(catalog) => {
            apply_catalog(&mut page, &catalog);
            info!(activities = catalog.len(), generation, "rendered activities");
            UiEvent::ActivitiesRendered {
                activities: catalog.len(),
            }
        }
        Err(error) => {
            error!(%error, kind = ?error.kind(), "error fetching activities");
            page.show_load_failure();
            UiEvent::ActivitiesLoadFailed {
                kind: error.kind(),
                reason: error.to_string(),
            }
        }
    }
}

/// Replaces the cards and select options with `catalog`, in catalog order.
pub fn apply_catalog(page: &mut PageContext, catalog: &ActivityCatalog) {
    page.show_activity_cards(catalog.iter().map(ActivityCard::from_activity).collect());
    page.signup_form
        .activity
        .rebuild(catalog.iter().map(|activity| &activity.name));
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
