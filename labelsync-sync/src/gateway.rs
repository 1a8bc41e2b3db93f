//! The seam between the engine and the remote service.
//!
//! The engine only issues semantic requests; transport, authentication and
//! pagination belong to the implementation.

use std::fmt;

use serde::Serialize;

use labelsync_core::{LabelPatch, Organization, ReferenceLabel, RemoteLabel, Repository};

use crate::error::GatewayError;

/// A lazily fetched, finite, single-pass listing. Each call to a listing method
/// starts a fresh sequence; an `Err` item ends it.
pub type Listing<'a, T> = Box<dyn Iterator<Item = Result<T, GatewayError>> + 'a>;

/// HTTP verbs issued against the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Patch,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote operations the engine depends on.
pub trait Gateway {
    /// Look up an account by login.
    fn organization(&self, login: &str) -> Result<Organization, GatewayError>;

    /// Every repository of `organization`, page by page.
    fn repositories<'a>(&'a self, organization: &Organization) -> Listing<'a, Repository>;

    /// Look up one repository of `organization` by name.
    fn repository(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Repository, GatewayError>;

    /// Every label of `repository`, page by page.
    fn labels<'a>(&'a self, repository: &Repository) -> Listing<'a, RemoteLabel>;

    /// Apply `patch` remotely and return the label's new state.
    fn update_label(
        &self,
        label: &RemoteLabel,
        patch: &LabelPatch,
    ) -> Result<RemoteLabel, GatewayError>;

    fn delete_label(&self, label: &RemoteLabel) -> Result<(), GatewayError>;

    fn create_label(
        &self,
        repository: &Repository,
        label: &ReferenceLabel,
    ) -> Result<(), GatewayError>;
}
