//! Page context: the regions of the signup page the board reads and mutates.

use askama::Template;
use shared::domain::{ActivityName, Email};
use thiserror::Error;

use super::{cards::ActivityCard, status::StatusRegion};

pub const LOADING_TEXT: &str = "Loading activities...";
pub const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The `<select id="activity">` control. The placeholder option (empty value)
/// is static markup and survives every rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    options: Vec<SelectOption>,
    selected: String,
}

impl SelectControl {
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Selects `value` if an option carries it. Returns whether it did.
    pub fn select(&mut self, value: &str) -> bool {
        if value.is_empty() || self.options.iter().any(|o| o.value == value) {
            self.selected = value.to_string();
            return true;
        }
        false
    }

    /// Drops every dynamic option and appends one per name. A selection whose
    /// option disappeared falls back to the placeholder.
    pub fn rebuild<'a>(&mut self, names: impl IntoIterator<Item = &'a ActivityName>) {
        self.options = names
            .into_iter()
            .map(|name| SelectOption {
                value: name.to_string(),
                label: name.to_string(),
            })
            .collect();
        if !self.options.iter().any(|o| o.value == self.selected) {
            self.selected.clear();
        }
    }

    fn reset(&mut self) {
        self.selected.clear();
    }
}

/// Why the form's `required`/`type=email` constraints blocked a submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please select an activity.")]
    MissingActivity,
}

/// Values read from the signup form on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupSubmission {
    pub email: Email,
    pub activity: ActivityName,
}

impl SignupSubmission {
    /// Checks what the browser checks before letting the form submit.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() {
            return Err(FormError::MissingEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if self.activity.trim().is_empty() {
            return Err(FormError::MissingActivity);
        }
        Ok(())
    }
}

/// `local@domain` in the shape an `<input type="email">` accepts.
pub fn is_valid_email(email: &str) -> bool {
    const LOCAL_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_SYMBOLS.contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: SelectControl,
}

impl SignupForm {
    /// The form's values, if they pass the input constraints.
    pub fn submission(&self) -> Result<SignupSubmission, FormError> {
        let submission = SignupSubmission {
            email: Email::new(self.email.trim()),
            activity: ActivityName::new(self.activity.selected()),
        };
        submission.validate()?;
        Ok(submission)
    }

    /// Same as `form.reset()`: inputs back to their initial values.
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.reset();
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.activity.selected().is_empty()
    }
}

/// The data carried by one rendered unregister control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub email: Email,
    pub activity: ActivityName,
}

/// Content of `#activities-list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitiesList {
    Loading,
    LoadFailed,
    Cards(Vec<ActivityCard>),
}

impl ActivitiesList {
    /// The static notice shown in place of cards, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_TEXT),
            Self::LoadFailed => Some(LOAD_FAILURE_TEXT),
            Self::Cards(_) => None,
        }
    }
}

/// Everything the handlers touch, built once at start-up.
#[derive(Debug, Clone)]
pub struct PageContext {
    activities: ActivitiesList,
    pub signup_form: SignupForm,
    pub status: StatusRegion,
    render_generation: u64,
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PageContext {
    pub fn new() -> Self {
        Self {
            activities: ActivitiesList::Loading,
            signup_form: SignupForm::default(),
            status: StatusRegion::default(),
            render_generation: 0,
        }
    }

    pub fn activities_list(&self) -> &ActivitiesList {
        &self.activities
    }

    /// Claims a token for a render about to start.
    pub fn begin_render(&mut self) -> u64 {
        self.render_generation += 1;
        self.render_generation
    }

    /// Whether no render has started since the one holding `generation`.
    pub fn is_current_render(&self, generation: u64) -> bool {
        generation == self.render_generation
    }

    pub fn show_activity_cards(&mut self, cards: Vec<ActivityCard>) {
        self.activities = ActivitiesList::Cards(cards);
    }

    pub fn show_load_failure(&mut self) {
        self.activities = ActivitiesList::LoadFailed;
    }

    pub fn activity_cards(&self) -> &[ActivityCard] {
        match &self.activities {
            ActivitiesList::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn activity_card(&self, activity: &str) -> Option<&ActivityCard> {
        self.activity_cards()
            .iter()
            .find(|card| card.name.as_str() == activity)
    }

    pub fn delete_controls(&self) -> Vec<DeleteControl> {
        self.activity_cards()
            .iter()
            .flat_map(|card| {
                card.participants.iter().map(|email| DeleteControl {
                    email: email.clone(),
                    activity: card.name.clone(),
                })
            })
            .collect()
    }

    /// Removes the roster entry for `email` from `activity`'s card. The
    /// spots-left line is left as rendered. An emptied roster shows the
    /// placeholder entry again.
    pub fn remove_participant(&mut self, activity: &str, email: &str) -> bool {
        let ActivitiesList::Cards(cards) = &mut self.activities else {
            return false;
        };
        cards
            .iter_mut()
            .find(|card| card.name.as_str() == activity)
            .is_some_and(|card| card.remove_participant(email))
    }

    pub fn to_html(&self) -> askama::Result<String> {
        let selected = self.signup_form.activity.selected();
        PageTemplate {
            notice: self.activities.notice(),
            cards: self.activity_cards(),
            email: &self.signup_form.email,
            options: self
                .signup_form
                .activity
                .options()
                .iter()
                .map(|option| OptionView {
                    value: &option.value,
                    label: &option.label,
                    selected: option.value == selected,
                })
                .collect(),
            status_classes: self.status.classes(),
            status_text: self.status.text(),
        }
        .render()
    }

    /// Plain-text rendering of the activity list and status region.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        let cards = self.activity_cards();
        if cards.is_empty() {
            lines.push(self.activities.notice().unwrap_or_default().to_string());
        }
        for card in cards {
            lines.push(format!("{} (Availability: {})", card.name, card.availability()));
            if card.has_empty_roster() {
                lines.push(format!("  - {}", super::cards::EMPTY_ROSTER_TEXT));
            }
            for email in &card.participants {
                lines.push(format!("  - {email}"));
            }
        }
        if self.status.is_visible() {
            let kind = self.status.kind().map(|kind| kind.class()).unwrap_or("info");
            lines.push(format!("[{kind}] {}", self.status.text()));
        }
        lines.join("\n")
    }
}

struct OptionView<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    notice: Option<&'a str>,
    cards: &'a [ActivityCard],
    email: &'a str,
    options: Vec<OptionView<'a>>,
    status_classes: String,
    status_text: &'a str,
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
