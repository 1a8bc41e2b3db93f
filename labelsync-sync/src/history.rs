//! Per-repository action log and its human report.
//!
//! One [`RunHistory`] exists per repository synchronization. It is passed
//! explicitly to every label operation and discarded once the report is shown.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use labelsync_core::{Repository, Rgb};

/// Spaces added after the widest label name in a report.
pub const REPORT_GUTTER: usize = 8;

/// One thing that happened to a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    Recolored { from: String, to: String },
    Renamed { from: String, to: String },
    /// Custom label; its color is deliberately left alone.
    CustomColorKept(Rgb),
    Deleted,
    DeleteCanceled,
    Unchanged,
    Created { color: String },
}

impl fmt::Display for LabelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelAction::Recolored { from, to } => {
                write!(f, "Color is changed from #{from} to #{to}")
            }
            LabelAction::Renamed { from, to } => write!(f, "Renamed from {from} to {to}"),
            LabelAction::CustomColorKept(rgb) => write!(
                f,
                "color will not be changed because this is a custom label: (R: {}, G: {}, B: {})",
                rgb.red, rgb.green, rgb.blue
            ),
            LabelAction::Deleted => write!(f, "Deleted"),
            LabelAction::DeleteCanceled => write!(f, "Delete canceled by user"),
            LabelAction::Unchanged => write!(f, "was not changed"),
            LabelAction::Created { color } => write!(f, "created with color: #{color}"),
        }
    }
}

/// Tally of actions in one history, for run summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub recolored: usize,
    pub renamed: usize,
    pub custom: usize,
    pub deleted: usize,
    pub delete_canceled: usize,
    pub created: usize,
    pub unchanged: usize,
}

impl ActionCounts {
    /// Number of actions that wrote to the remote service.
    pub fn mutations(&self) -> usize {
        self.recolored + self.renamed + self.deleted + self.created
    }
}

/// Action log for one repository, keyed by lowercase label name.
///
/// Labels keep the order in which they were first logged; entries keep append order.
#[derive(Debug, Clone)]
pub struct RunHistory {
    repository: String,
    labels: IndexMap<String, Vec<LabelAction>>,
}

impl RunHistory {
    pub fn new(repository: &Repository) -> Self {
        Self {
            repository: repository.full_name.clone(),
            labels: IndexMap::new(),
        }
    }

    /// `full_name` of the repository this history belongs to.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Append `action` under `label_name`, lowercased.
    pub fn log(&mut self, label_name: &str, action: LabelAction) {
        tracing::debug!(repository = %self.repository, label = label_name, "{action}");
        self.labels
            .entry(label_name.to_lowercase())
            .or_default()
            .push(action);
    }

    pub fn entries(&self, label_name: &str) -> &[LabelAction] {
        self.labels
            .get(&label_name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every lowercase label name logged so far.
    pub fn logged_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Every `(label, action)` pair in report order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &LabelAction)> {
        self.labels
            .iter()
            .flat_map(|(name, actions)| actions.iter().map(move |action| (name.as_str(), action)))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn counts(&self) -> ActionCounts {
        let mut counts = ActionCounts::default();
        for action in self.labels.values().flatten() {
            match action {
                LabelAction::Recolored { .. } => counts.recolored += 1,
                LabelAction::Renamed { .. } => counts.renamed += 1,
                LabelAction::CustomColorKept(_) => counts.custom += 1,
                LabelAction::Deleted => counts.deleted += 1,
                LabelAction::DeleteCanceled => counts.delete_canceled += 1,
                LabelAction::Created { .. } => counts.created += 1,
                LabelAction::Unchanged => counts.unchanged += 1,
            }
        }
        counts
    }

    /// Header line naming the repository, then one aligned line per entry.
    pub fn report(&self) -> String {
        let width = REPORT_GUTTER
            + self
                .labels
                .keys()
                .map(|name| name.chars().count())
                .max()
                .unwrap_or(0);

        let mut lines = vec![format!("{}:", self.repository)];
        lines.extend(
            self.actions()
                .map(|(name, action)| format!("{name:<width$}{action}")),
        );
        lines.join("\n")
    }
}
