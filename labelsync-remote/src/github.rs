//! GitHub REST gateway.
//!
//! ## Endpoints
//!
//! ```text
//! GET    orgs/<login>                 (falls back to users/<login> on 404)
//! GET    <repos_url>                  paginated
//! GET    repos/<owner>/<name>
//! GET    repos/<owner>/<name>/labels  paginated, 100 per page
//! PATCH  <label url>                  {"new_name": ..} or {"color": ..}
//! DELETE <label url>
//! POST   repos/<owner>/<name>/labels  {"name": .., "color": ..}
//! ```
//!
//! Relative paths are joined onto the configured API root; absolute URLs
//! returned by the API are used as-is.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use urlencoding::encode;

use labelsync_core::{LabelPatch, Organization, ReferenceLabel, RemoteLabel, Repository};
use labelsync_sync::{Gateway, GatewayError, Listing, Method};

use crate::pages::Paginated;
use crate::transport::{GitHubConfig, HttpTransport, Transport};
use crate::wire::{AccountPayload, CreateLabel, LabelPayload, RepositoryPayload};

/// Largest page size the labels endpoint accepts.
const LABELS_PER_PAGE: u32 = 100;

/// [`Gateway`] over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHub<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl GitHub<HttpTransport> {
    /// Gateway with the blocking HTTP transport.
    pub fn connect(config: &GitHubConfig) -> Self {
        Self::with_transport(HttpTransport::new(config), config.base_url.clone())
    }
}

impl<T: Transport> GitHub<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for `path`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.to_ascii_lowercase().starts_with("http") {
            return path.to_owned();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get<P: DeserializeOwned>(&self, path: &str) -> Result<P, GatewayError> {
        let url = self.endpoint(path);
        let response = self.transport.send(Method::Get, &url, None)?;
        decode(response.body, &url)
    }

    fn labels_path(repository: &Repository) -> String {
        format!(
            "repos/{}/{}/labels",
            encode(&repository.owner),
            encode(&repository.name)
        )
    }
}

fn decode<P: DeserializeOwned>(body: Value, url: &str) -> Result<P, GatewayError> {
    serde_json::from_value(body).map_err(|e| GatewayError::Decode {
        url: url.to_owned(),
        message: e.to_string(),
    })
}

fn to_json<S: serde::Serialize>(value: &S, url: &str) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::Decode {
        url: url.to_owned(),
        message: e.to_string(),
    })
}

impl<T: Transport> Gateway for GitHub<T> {
    fn organization(&self, login: &str) -> Result<Organization, GatewayError> {
        let account = encode(login);
        match self.get::<AccountPayload>(&format!("orgs/{account}")) {
            Err(err) if err.status() == Some(404) => {
                debug!(login, "not an organization; trying user account");
                self.get::<AccountPayload>(&format!("users/{account}"))
                    .map(Organization::from)
            }
            other => other.map(Organization::from),
        }
    }

    fn repositories<'a>(&'a self, organization: &Organization) -> Listing<'a, Repository> {
        let url = self.endpoint(&organization.repos_url);
        Box::new(Paginated::new(
            &self.transport,
            url,
            |p: RepositoryPayload| Repository::from(p),
        ))
    }

    fn repository(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Repository, GatewayError> {
        self.get::<RepositoryPayload>(&format!(
            "repos/{}/{}",
            encode(&organization.login),
            encode(name)
        ))
        .map(Repository::from)
    }

    fn labels<'a>(&'a self, repository: &Repository) -> Listing<'a, RemoteLabel> {
        let url = self.endpoint(&format!(
            "{}?per_page={LABELS_PER_PAGE}",
            Self::labels_path(repository)
        ));
        let full_name = repository.full_name.clone();
        Box::new(Paginated::new(
            &self.transport,
            url,
            move |p: LabelPayload| p.into_remote(&full_name),
        ))
    }

    fn update_label(
        &self,
        label: &RemoteLabel,
        patch: &LabelPatch,
    ) -> Result<RemoteLabel, GatewayError> {
        let url = self.endpoint(&label.url);
        let body = to_json(patch, &url)?;
        let response = self.transport.send(Method::Patch, &url, Some(&body))?;

        if let Ok(updated) = serde_json::from_value::<LabelPayload>(response.body) {
            return Ok(updated.into_remote(&label.repository));
        }

        // No usable body: derive the new state locally.
        let mut updated = label.clone();
        patch.apply(&mut updated);
        if let (Some(name), Some((base, _))) = (&patch.name, label.url.rsplit_once('/')) {
            updated.url = format!("{base}/{}", encode(name));
        }
        Ok(updated)
    }

    fn delete_label(&self, label: &RemoteLabel) -> Result<(), GatewayError> {
        let url = self.endpoint(&label.url);
        self.transport.send(Method::Delete, &url, None)?;
        Ok(())
    }

    fn create_label(
        &self,
        repository: &Repository,
        label: &ReferenceLabel,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(&Self::labels_path(repository));
        let body = to_json(
            &CreateLabel {
                name: &label.name,
                color: &label.color,
            },
            &url,
        )?;
        self.transport.send(Method::Post, &url, Some(&body))?;
        Ok(())
    }
}
