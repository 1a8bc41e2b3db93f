//! Multi-account sync pipeline.
//!
//! Accounts are processed one at a time, repositories one at a time. Every
//! repository gets its own [`RunHistory`]; the observer sees it once the
//! repository is done, whether it completed, was skipped, or failed.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{info, warn};

use labelsync_core::Repository;

use crate::error::SyncError;
use crate::gateway::Gateway;
use crate::history::{ActionCounts, RunHistory};
use crate::reconcile::{reconcile_repository, RepositoryOutcome, SyncContext};

/// What to synchronize: a whole account, or one of its repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Account(String),
    Repository { account: String, name: String },
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            None if !s.is_empty() => Ok(Target::Account(s.to_owned())),
            Some((account, name))
                if !account.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Target::Repository {
                    account: account.to_owned(),
                    name: name.to_owned(),
                })
            }
            _ => Err(format!(
                "invalid target '{s}'; expected ACCOUNT or ACCOUNT/REPOSITORY"
            )),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Account(account) => f.write_str(account),
            Target::Repository { account, name } => write!(f, "{account}/{name}"),
        }
    }
}

/// Receives each repository's result as soon as it is known.
pub trait RunObserver {
    fn repository_finished(
        &mut self,
        repository: &Repository,
        outcome: &RepositoryOutcome,
        history: &RunHistory,
    );
}

/// One logged action, rendered for machine-readable summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionEntry {
    pub label: String,
    pub action: String,
}

/// One row of a [`RunSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub repository: String,
    pub outcome: RepositoryOutcome,
    pub counts: ActionCounts,
    /// The repository's full action log, in report order.
    pub actions: Vec<ActionEntry>,
}

/// Per-repository outcomes of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub repositories: Vec<RepositorySummary>,
}

impl RunSummary {
    pub fn record(
        &mut self,
        repository: &Repository,
        outcome: &RepositoryOutcome,
        history: &RunHistory,
    ) {
        self.repositories.push(RepositorySummary {
            repository: repository.full_name.clone(),
            outcome: outcome.clone(),
            counts: history.counts(),
            actions: history
                .actions()
                .map(|(label, action)| ActionEntry {
                    label: label.to_owned(),
                    action: action.to_string(),
                })
                .collect(),
        });
    }

    /// Sum of counts over every repository.
    pub fn totals(&self) -> ActionCounts {
        self.repositories
            .iter()
            .fold(ActionCounts::default(), |mut acc, row| {
                acc.recolored += row.counts.recolored;
                acc.renamed += row.counts.renamed;
                acc.custom += row.counts.custom;
                acc.deleted += row.counts.deleted;
                acc.delete_canceled += row.counts.delete_canceled;
                acc.created += row.counts.created;
                acc.unchanged += row.counts.unchanged;
                acc
            })
    }
}

impl RunObserver for RunSummary {
    fn repository_finished(
        &mut self,
        repository: &Repository,
        outcome: &RepositoryOutcome,
        history: &RunHistory,
    ) {
        self.record(repository, outcome, history);
    }
}

/// Synchronize every target in order.
///
/// Stops at the first error: a failed remote call or an `abort` answer.
/// The observer has already seen the repository that failed.
pub fn run<G: Gateway + ?Sized>(
    ctx: &mut SyncContext<'_, G>,
    targets: &[Target],
    observer: &mut dyn RunObserver,
) -> Result<(), SyncError> {
    let gateway = ctx.gateway;

    for target in targets {
        info!(scope = %target, "synchronizing");
        match target {
            Target::Repository { account, name } => {
                let organization = gateway.organization(account)?;
                let repository = gateway.repository(&organization, name)?;
                synchronize(ctx, &repository, observer)?;
            }
            Target::Account(account) => {
                let organization = gateway.organization(account)?;
                for repository in gateway.repositories(&organization) {
                    synchronize(ctx, &repository?, observer)?;
                }
            }
        }
    }
    Ok(())
}

fn synchronize<G: Gateway + ?Sized>(
    ctx: &mut SyncContext<'_, G>,
    repository: &Repository,
    observer: &mut dyn RunObserver,
) -> Result<(), SyncError> {
    let mut history = RunHistory::new(repository);

    if repository.is_excluded(&ctx.options.excludes) {
        info!(repository = %repository, "excluded");
        observer.repository_finished(repository, &RepositoryOutcome::Excluded, &history);
        return Ok(());
    }

    let result = reconcile_repository(ctx, repository, &mut history);
    let outcome = match &result {
        Ok(outcome) => outcome.clone(),
        Err(SyncError::Aborted { .. }) => RepositoryOutcome::Aborted,
        Err(err) => {
            warn!(repository = %repository, "synchronization failed: {err}");
            RepositoryOutcome::Failed {
                error: err.to_string(),
            }
        }
    };
    observer.repository_finished(repository, &outcome, &history);
    result.map(|_| ())
}
