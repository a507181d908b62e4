//! Blocking confirmation and alert dialogs.

use std::io::{self, BufRead, Write};

/// The two blocking dialogs the roster handler needs. Implementations block
/// the caller until the user answers.
pub trait Dialogs: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Dialogs on the controlling terminal: prompts go to stderr, answers come
/// from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDialogs {
    auto_confirm: bool,
}

impl TerminalDialogs {
    pub fn new(auto_confirm: bool) -> Self {
        Self { auto_confirm }
    }
}

impl Dialogs for TerminalDialogs {
    fn confirm(&self, message: &str) -> bool {
        if self.auto_confirm {
            eprintln!("{message} [confirmed by --yes]");
            return true;
        }

        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
