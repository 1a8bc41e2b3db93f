//! # labelsync-sync
//!
//! The reconciliation engine.
//!
//! Call [`reconcile_repository`] to bring one repository's labels in line with a
//! [`ReferenceSet`](labelsync_core::ReferenceSet), or [`pipeline::run`] to walk
//! every repository of a list of accounts. All remote access goes through the
//! [`Gateway`] trait.

pub mod error;
pub mod gateway;
pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod reconcile;
pub mod remaining;

pub use error::{GatewayError, SyncError};
pub use gateway::{Gateway, Listing, Method};
pub use history::{ActionCounts, LabelAction, RunHistory};
pub use pipeline::{ActionEntry, RepositorySummary, RunObserver, RunSummary, Target};
pub use prompt::{ConfirmState, Confirmation, Decision, Prompter};
pub use reconcile::{reconcile_repository, RepositoryOutcome, SyncContext, SyncOptions};
pub use remaining::remaining_labels;
