//! Human output: per-repository reports as they finish, then the run summary.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use labelsync_core::Repository;
use labelsync_sync::{ActionCounts, RepositoryOutcome, RunHistory, RunObserver, RunSummary};

/// Prints each repository's report and collects the run summary.
///
/// In JSON mode reports are not printed so stdout carries a single document;
/// each row's `actions` holds the same log.
pub struct Console {
    json: bool,
    summary: RunSummary,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "outcome")]
    outcome: String,
    #[tabled(rename = "recolored")]
    recolored: usize,
    #[tabled(rename = "renamed")]
    renamed: usize,
    #[tabled(rename = "deleted")]
    deleted: usize,
    #[tabled(rename = "created")]
    created: usize,
    #[tabled(rename = "unchanged")]
    unchanged: usize,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    totals: ActionCounts,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

impl Console {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            summary: RunSummary::default(),
        }
    }

    pub fn print_summary(&self) -> Result<()> {
        if self.json {
            let payload = SummaryJson {
                totals: self.summary.totals(),
                summary: &self.summary,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .context("failed to serialize run summary")?
            );
            return Ok(());
        }

        if self.summary.repositories.is_empty() {
            println!("No repositories processed.");
            return Ok(());
        }

        let rows: Vec<SummaryRow> = self
            .summary
            .repositories
            .iter()
            .map(|row| SummaryRow {
                repository: row.repository.clone(),
                outcome: outcome_label(&row.outcome).to_string(),
                recolored: row.counts.recolored,
                renamed: row.counts.renamed,
                deleted: row.counts.deleted,
                created: row.counts.created,
                unchanged: row.counts.unchanged,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());

        let totals = self.summary.totals();
        println!();
        println!("{table}");
        println!(
            "{} repositories | {} labels changed | {} deletions canceled",
            self.summary.repositories.len(),
            totals.mutations(),
            totals.delete_canceled,
        );
        Ok(())
    }

    fn print_report(&self, history: &RunHistory) {
        let report = history.report();
        let mut lines = report.lines();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{line}");
        }
    }
}

impl RunObserver for Console {
    fn repository_finished(
        &mut self,
        repository: &Repository,
        outcome: &RepositoryOutcome,
        history: &RunHistory,
    ) {
        self.summary.record(repository, outcome, history);
        if self.json {
            return;
        }

        match outcome {
            RepositoryOutcome::Excluded => {
                println!("{}", format!("{repository} repository is ignored.").yellow());
            }
            RepositoryOutcome::Skipped => {
                self.print_report(history);
                println!("{}", format!("{repository} repository skipped by user.").yellow());
            }
            RepositoryOutcome::Failed { error } => {
                self.print_report(history);
                println!("{}", format!("{repository}: {error}").red());
            }
            RepositoryOutcome::Completed | RepositoryOutcome::Aborted => {
                self.print_report(history);
            }
        }
    }
}

fn outcome_label(outcome: &RepositoryOutcome) -> &'static str {
    match outcome {
        RepositoryOutcome::Completed => "completed",
        RepositoryOutcome::Skipped => "skipped",
        RepositoryOutcome::Excluded => "ignored",
        RepositoryOutcome::Aborted => "aborted",
        RepositoryOutcome::Failed { .. } => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelsync_sync::LabelAction;

    fn repo(name: &str) -> Repository {
        Repository {
            full_name: format!("acme/{name}"),
            name: name.into(),
            owner: "acme".into(),
        }
    }

    #[test]
    fn observer_records_every_outcome() {
        let mut console = Console::new(true);
        for (name, outcome) in [
            ("api", RepositoryOutcome::Completed),
            ("web", RepositoryOutcome::Excluded),
        ] {
            let repository = repo(name);
            console.repository_finished(&repository, &outcome, &RunHistory::new(&repository));
        }
        let rows: Vec<_> = console
            .summary
            .repositories
            .iter()
            .map(|row| outcome_label(&row.outcome))
            .collect();
        assert_eq!(rows, vec!["completed", "ignored"]);
    }

    #[test]
    fn json_payload_carries_totals_and_rows() {
        let repository = repo("api");
        let mut summary = RunSummary::default();
        summary.record(&repository, &RepositoryOutcome::Skipped, &RunHistory::new(&repository));
        let value = serde_json::to_value(SummaryJson {
            totals: summary.totals(),
            summary: &summary,
        })
        .unwrap();
        assert_eq!(value["totals"]["deleted"], 0);
        assert_eq!(value["repositories"][0]["repository"], "acme/api");
        assert_eq!(value["repositories"][0]["outcome"]["status"], "skipped");
        assert_eq!(value["repositories"][0]["actions"], serde_json::json!([]));
    }

    #[test]
    fn json_mode_keeps_the_audit_trail() {
        let repository = repo("api");
        let mut history = RunHistory::new(&repository);
        history.log("bug", LabelAction::Unchanged);

        let mut console = Console::new(true);
        console.repository_finished(&repository, &RepositoryOutcome::Completed, &history);

        let value = serde_json::to_value(SummaryJson {
            totals: console.summary.totals(),
            summary: &console.summary,
        })
        .unwrap();
        assert_eq!(
            value["repositories"][0]["actions"],
            serde_json::json!([{ "label": "bug", "action": "was not changed" }])
        );
    }
}
