//! JSON payloads exchanged with the GitHub REST API.

use serde::{Deserialize, Serialize};

use labelsync_core::{Organization, RemoteLabel, Repository};

#[derive(Debug, Deserialize)]
pub(crate) struct AccountPayload {
    pub login: String,
    pub repos_url: String,
}

impl From<AccountPayload> for Organization {
    fn from(p: AccountPayload) -> Self {
        Self {
            login: p.login,
            repos_url: p.repos_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerPayload {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPayload {
    pub full_name: String,
    pub name: String,
    pub owner: OwnerPayload,
}

impl From<RepositoryPayload> for Repository {
    fn from(p: RepositoryPayload) -> Self {
        Self {
            full_name: p.full_name,
            name: p.name,
            owner: p.owner.login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelPayload {
    pub name: String,
    pub color: String,
    pub url: String,
}

impl LabelPayload {
    pub fn into_remote(self, repository: &str) -> RemoteLabel {
        RemoteLabel {
            name: self.name.trim().to_owned(),
            color: self.color.trim().to_owned(),
            url: self.url,
            repository: repository.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateLabel<'a> {
    pub name: &'a str,
    pub color: &'a str,
}
