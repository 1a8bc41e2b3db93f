//! labelsync core library: domain types, the reference label set, the color
//! classifier, errors.
//!
//! Public API surface:
//! - [`types`]: labels, repositories, accounts and colors
//! - [`reference`]: [`ReferenceSet`], built-in list and file loader
//! - [`classify`]: standard / custom / renamed / garbage policy
//! - [`error`]: [`ReferenceError`]

pub mod classify;
pub mod error;
pub mod reference;
pub mod types;

pub use classify::{classify, Classification};
pub use error::ReferenceError;
pub use reference::ReferenceSet;
pub use types::{
    colors_match, LabelPatch, Organization, ReferenceLabel, RemoteLabel, Repository, Rgb,
};
