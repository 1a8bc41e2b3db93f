//! Interactive confirmation for destructive actions.
//!
//! ## States
//!
//! ```text
//! AwaitInitial --yes------------------> Resolved(Proceed)
//!              --abort----------------> Resolved(Abort)
//!              --skip-----------------> Resolved(Skip)
//!              --y* (not "yes")-------> AwaitExactYes
//!              --anything else--------> Resolved(Cancel)
//! AwaitExactYes --yes-----------------> Resolved(Proceed)
//!               --y* (not "yes")------> AwaitExactYes
//!               --anything else-------> Resolved(Cancel)
//! ```
//!
//! Responses are compared trimmed and case-insensitively. The machine is pure;
//! [`confirm_deletion`] drives it with any [`Prompter`].

use std::io;

use labelsync_core::RemoteLabel;

/// Final answer to a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead with the deletion.
    Proceed,
    /// Keep this label; continue with the repository.
    Cancel,
    /// Abandon the rest of the current repository.
    Skip,
    /// Stop the whole run.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitInitial,
    AwaitExactYes,
    Resolved(Decision),
}

/// Confirmation state machine for one deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    state: ConfirmState,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation {
    pub fn new() -> Self {
        Self {
            state: ConfirmState::AwaitInitial,
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    /// The decision, once resolved.
    pub fn decision(&self) -> Option<Decision> {
        match self.state {
            ConfirmState::Resolved(decision) => Some(decision),
            _ => None,
        }
    }

    /// Question to show for the current state; `None` once resolved.
    pub fn question(&self, label: &RemoteLabel) -> Option<String> {
        match self.state {
            ConfirmState::AwaitInitial => Some(format!(
                "Label {} with #{} will be removed from {} by your confirmation. [yes/No/abort/skip]",
                label.name, label.color, label.repository
            )),
            ConfirmState::AwaitExactYes => {
                Some("Please type yes to confirm and anything else to cancel".to_owned())
            }
            ConfirmState::Resolved(_) => None,
        }
    }

    /// Advance with one response. Responses after resolution are ignored.
    pub fn feed(&mut self, response: &str) -> ConfirmState {
        let answer = response.trim().to_lowercase();
        self.state = match self.state {
            ConfirmState::AwaitInitial => match answer.as_str() {
                "yes" => ConfirmState::Resolved(Decision::Proceed),
                "abort" => ConfirmState::Resolved(Decision::Abort),
                "skip" => ConfirmState::Resolved(Decision::Skip),
                a if a.starts_with('y') => ConfirmState::AwaitExactYes,
                _ => ConfirmState::Resolved(Decision::Cancel),
            },
            ConfirmState::AwaitExactYes => match answer.as_str() {
                "yes" => ConfirmState::Resolved(Decision::Proceed),
                a if a.starts_with('y') => ConfirmState::AwaitExactYes,
                _ => ConfirmState::Resolved(Decision::Cancel),
            },
            resolved @ ConfirmState::Resolved(_) => resolved,
        };
        self.state
    }
}

/// Source of answers to confirmation questions.
pub trait Prompter {
    /// Show `question` and return the raw response.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Ask until the confirmation for deleting `label` resolves.
pub fn confirm_deletion(prompter: &mut dyn Prompter, label: &RemoteLabel) -> io::Result<Decision> {
    let mut confirmation = Confirmation::new();
    loop {
        if let Some(decision) = confirmation.decision() {
            return Ok(decision);
        }
        if let Some(question) = confirmation.question(label) {
            let response = prompter.ask(&question)?;
            confirmation.feed(&response);
        }
    }
}
