//! One `activity-card` per activity, rendered from `templates/activity_card.html`.

use askama::Template;
use shared::domain::{Activity, ActivityName, Email};

pub const PARTICIPANT_ITEM_CLASS: &str = "participant-item";
pub const PARTICIPANT_EMPTY_CLASS: &str = "participant-empty";

pub const EMPTY_ROSTER_TEXT: &str = "No participants yet";

pub fn spots_left_text(spots_left: i64) -> String {
    format!("{spots_left} spots left")
}

/// What a rendered card shows. The roster can shrink locally after an
/// unregister; `spots_left` stays as the server computed it at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: ActivityName,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<Email>,
}

impl ActivityCard {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            description: activity.details.description.clone(),
            schedule: activity.details.schedule.clone(),
            spots_left: activity.spots_left(),
            participants: activity.details.participants.clone(),
        }
    }

    pub fn availability(&self) -> String {
        spots_left_text(self.spots_left)
    }

    /// Whether the roster shows the "No participants yet" placeholder.
    pub fn has_empty_roster(&self) -> bool {
        self.participants.is_empty()
    }

    /// Drops the first entry for `email`. Returns whether one was there.
    pub fn remove_participant(&mut self, email: &str) -> bool {
        match self.participants.iter().position(|p| p.as_str() == email) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn to_html(&self) -> askama::Result<String> {
        ActivityCardTemplate { card: self }.render()
    }
}

#[derive(Template)]
#[template(path = "activity_card.html")]
struct ActivityCardTemplate<'a> {
    card: &'a ActivityCard,
}
