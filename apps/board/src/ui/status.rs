//! Transient status region (`#message`) shown after a signup attempt.

use askama::Template;

pub const STATUS_REGION_ID: &str = "message";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// `idle -> visible(kind) -> idle`. Each `show` starts a new generation; a
/// hide request carrying an older generation leaves the newer message alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegion {
    text: String,
    kind: Option<StatusKind>,
    visible: bool,
    generation: u64,
}

impl StatusRegion {
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.kind = Some(kind);
        self.visible = true;
        self.generation += 1;
        self.generation
    }

    /// Hides the region if `generation` is still the message on display.
    pub fn hide_if_current(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> Option<StatusKind> {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Class list of the region: the kind, then `hidden` while idle.
    pub fn classes(&self) -> String {
        let mut classes = Vec::new();
        if let Some(kind) = self.kind {
            classes.push(kind.class());
        }
        if !self.visible {
            classes.push(HIDDEN_CLASS);
        }
        classes.join(" ")
    }

    pub fn to_html(&self) -> askama::Result<String> {
        StatusTemplate {
            status_classes: self.classes(),
            status_text: &self.text,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate<'a> {
    status_classes: String,
    status_text: &'a str,
}
