//! Per-repository label reconciliation.
//!
//! ## Pass
//!
//! 1. List every label of the repository before changing any of them.
//! 2. For each label, by classification:
//!    - standard: fix color, then fix casing (both always checked)
//!    - custom: fix casing; color is left alone and noted
//!    - renamed: fix casing, then rename to the canonical name with its color
//!    - garbage: delete, after confirmation unless `assume_yes`
//!
//!    A label nothing happened to is logged as unchanged.
//! 3. Create every canonical label not logged in step 2.
//!
//! A `skip` answer ends the pass for this repository without step 3; an
//! `abort` answer ends it with [`SyncError::Aborted`]. Writes already made stay
//! made.

use serde::Serialize;
use tracing::{debug, info};

use labelsync_core::{
    classify, colors_match, Classification, LabelPatch, ReferenceSet, RemoteLabel, Repository,
};

use crate::error::SyncError;
use crate::gateway::Gateway;
use crate::history::{LabelAction, RunHistory};
use crate::prompt::{confirm_deletion, Decision, Prompter};
use crate::remaining::remaining_labels;

/// Run-wide behaviour switches.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Delete garbage labels without asking.
    pub assume_yes: bool,
    /// Repositories to leave untouched, by `full_name` or bare `name`.
    pub excludes: Vec<String>,
}

/// How a repository's synchronization ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryOutcome {
    Completed,
    /// The user answered `skip`; missing labels were not created.
    Skipped,
    /// Named by the exclusion list; nothing was read or written.
    Excluded,
    /// The user answered `abort`.
    Aborted,
    /// A remote call failed.
    Failed { error: String },
}

/// Collaborators shared by every repository of a run.
pub struct SyncContext<'a, G: Gateway + ?Sized> {
    pub gateway: &'a G,
    pub reference: &'a ReferenceSet,
    pub options: &'a SyncOptions,
    pub prompter: &'a mut dyn Prompter,
}

enum LabelStep {
    Continue,
    Skip,
}

/// Reconcile every label of `repository`, logging into `history`.
///
/// `history` keeps whatever was logged even when this returns an error.
pub fn reconcile_repository<G: Gateway + ?Sized>(
    ctx: &mut SyncContext<'_, G>,
    repository: &Repository,
    history: &mut RunHistory,
) -> Result<RepositoryOutcome, SyncError> {
    let gateway = ctx.gateway;

    // Page-numbered listings shift under deletes and renames; read them all first.
    let labels = gateway
        .labels(repository)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(repository = %repository, count = labels.len(), "labels listed");

    for mut label in labels {
        if let LabelStep::Skip = reconcile_label(ctx, &mut label, history)? {
            info!(repository = %repository, "skipped by user");
            return Ok(RepositoryOutcome::Skipped);
        }
    }

    for missing in remaining_labels(ctx.reference, history.logged_names()) {
        gateway.create_label(repository, &missing)?;
        info!(repository = %repository, label = %missing.name, "created");
        history.log(
            &missing.name,
            LabelAction::Created {
                color: missing.color.clone(),
            },
        );
    }

    Ok(RepositoryOutcome::Completed)
}

fn reconcile_label<G: Gateway + ?Sized>(
    ctx: &mut SyncContext<'_, G>,
    label: &mut RemoteLabel,
    history: &mut RunHistory,
) -> Result<LabelStep, SyncError> {
    let classification = classify(label, ctx.reference);
    debug!(
        repository = %label.repository,
        label = %label.name,
        color = %label.color,
        "classified as {classification}"
    );

    let changed = match classification {
        Classification::Standard => {
            let recolored = ensure_color(ctx, label, history)?;
            let recased = ensure_casing(ctx, label, history)?;
            recolored || recased
        }
        Classification::Custom(rgb) => {
            let recased = ensure_casing(ctx, label, history)?;
            history.log(&label.name, LabelAction::CustomColorKept(rgb));
            recased
        }
        Classification::Renamed { canonical } => {
            ensure_casing(ctx, label, history)?;
            rename(ctx, label, &canonical, history)?;
            true
        }
        Classification::Garbage => match delete(ctx, label, history)? {
            Decision::Skip => return Ok(LabelStep::Skip),
            Decision::Abort => {
                return Err(SyncError::Aborted {
                    repository: label.repository.clone(),
                })
            }
            Decision::Proceed | Decision::Cancel => true,
        },
    };

    if !changed {
        history.log(&label.name, LabelAction::Unchanged);
    }
    Ok(LabelStep::Continue)
}

/// Recolor a standard label to its canonical color. Returns whether it wrote.
fn ensure_color<G: Gateway + ?Sized>(
    ctx: &SyncContext<'_, G>,
    label: &mut RemoteLabel,
    history: &mut RunHistory,
) -> Result<bool, SyncError> {
    let Some(canonical) = ctx.reference.color_of(&label.name) else {
        return Ok(false);
    };
    if colors_match(&label.color, canonical) {
        return Ok(false);
    }

    let from = label.color.clone();
    *label = ctx
        .gateway
        .update_label(label, &LabelPatch::recolor(canonical))?;
    info!(repository = %label.repository, label = %label.name, from = %from, to = canonical, "recolored");
    history.log(
        &label.name,
        LabelAction::Recolored {
            from,
            to: canonical.to_owned(),
        },
    );
    Ok(true)
}

/// Lowercase the label's name. Returns whether it wrote.
fn ensure_casing<G: Gateway + ?Sized>(
    ctx: &SyncContext<'_, G>,
    label: &mut RemoteLabel,
    history: &mut RunHistory,
) -> Result<bool, SyncError> {
    let lower = label.name.to_lowercase();
    if label.name == lower {
        return Ok(false);
    }
    rename(ctx, label, &lower, history)?;
    Ok(true)
}

fn rename<G: Gateway + ?Sized>(
    ctx: &SyncContext<'_, G>,
    label: &mut RemoteLabel,
    to: &str,
    history: &mut RunHistory,
) -> Result<(), SyncError> {
    let from = label.name.clone();
    *label = ctx.gateway.update_label(label, &LabelPatch::rename(to))?;
    info!(repository = %label.repository, from = %from, to = to, "renamed");
    history.log(
        &label.name,
        LabelAction::Renamed {
            from,
            to: to.to_owned(),
        },
    );
    Ok(())
}

fn delete<G: Gateway + ?Sized>(
    ctx: &mut SyncContext<'_, G>,
    label: &RemoteLabel,
    history: &mut RunHistory,
) -> Result<Decision, SyncError> {
    let decision = if ctx.options.assume_yes {
        Decision::Proceed
    } else {
        confirm_deletion(ctx.prompter, label)?
    };

    match decision {
        Decision::Proceed => {
            ctx.gateway.delete_label(label)?;
            info!(repository = %label.repository, label = %label.name, "deleted");
            history.log(&label.name, LabelAction::Deleted);
        }
        Decision::Cancel => history.log(&label.name, LabelAction::DeleteCanceled),
        Decision::Skip | Decision::Abort => {}
    }
    Ok(decision)
}
