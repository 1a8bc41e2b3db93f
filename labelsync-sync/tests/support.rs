//! Test doubles: an in-memory [`Gateway`] that records every mutating call,
//! and a [`Prompter`] that replays scripted answers.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::io;

use labelsync_core::{LabelPatch, Organization, ReferenceLabel, RemoteLabel, Repository};
use labelsync_sync::{Gateway, GatewayError, Listing, Method, Prompter};

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// Answers from a fixed script. Running out of answers is an `UnexpectedEof` error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
    /// Every question asked so far.
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.asked.push(question.to_owned());
        self.responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted response left"))
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// A mutating call as the remote service saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Update { url: String, patch: LabelPatch },
    Delete { url: String },
    Create { repository: String, name: String, color: String },
}

#[derive(Debug, Default)]
struct State {
    repositories: BTreeMap<String, Vec<Repository>>,
    labels: BTreeMap<String, Vec<RemoteLabel>>,
    calls: Vec<Call>,
}

#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RefCell<State>,
    /// Label URLs whose mutation fails with HTTP 422.
    failing: RefCell<HashSet<String>>,
    /// When set, label listings are served by page number from the live list.
    page_size: Option<usize>,
    /// Label pages served so far.
    pages_served: Cell<usize>,
}

pub fn label_url(repository: &str, name: &str) -> String {
    format!("mem://{repository}/labels/{name}")
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository under `owner` with the given `(name, color)` labels.
    pub fn with_repository(self, owner: &str, name: &str, labels: &[(&str, &str)]) -> Self {
        let full_name = format!("{owner}/{name}");
        {
            let mut state = self.state.borrow_mut();
            state
                .repositories
                .entry(owner.to_owned())
                .or_default()
                .push(Repository {
                    full_name: full_name.clone(),
                    name: name.to_owned(),
                    owner: owner.to_owned(),
                });
            let remote = labels
                .iter()
                .map(|(n, c)| RemoteLabel {
                    name: (*n).to_owned(),
                    color: (*c).to_owned(),
                    url: label_url(&full_name, n),
                    repository: full_name.clone(),
                })
                .collect();
            state.labels.insert(full_name, remote);
        }
        self
    }

    /// Serve label listings `size` at a time, reading the current list for
    /// every page the way a page-numbered API does.
    pub fn paged(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    pub fn pages_served(&self) -> usize {
        self.pages_served.get()
    }

    pub fn fail_on(&self, repository: &str, label: &str) {
        self.failing.borrow_mut().insert(label_url(repository, label));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Current `(name, color)` pairs of a repository, sorted by name.
    pub fn labels_of(&self, repository: &str) -> Vec<(String, String)> {
        let mut labels: Vec<_> = self.state.borrow().labels[repository]
            .iter()
            .map(|l| (l.name.clone(), l.color.clone()))
            .collect();
        labels.sort();
        labels
    }

    fn check(&self, method: Method, url: &str) -> Result<(), GatewayError> {
        if self.failing.borrow().contains(url) {
            return Err(GatewayError::Status {
                method,
                url: url.to_owned(),
                status: 422,
            });
        }
        Ok(())
    }

    fn not_found(url: String) -> GatewayError {
        GatewayError::Status {
            method: Method::Get,
            url,
            status: 404,
        }
    }
}

impl Gateway for MemoryGateway {
    fn organization(&self, login: &str) -> Result<Organization, GatewayError> {
        if !self.state.borrow().repositories.contains_key(login) {
            return Err(Self::not_found(format!("mem://orgs/{login}")));
        }
        Ok(Organization {
            login: login.to_owned(),
            repos_url: format!("mem://orgs/{login}/repos"),
        })
    }

    fn repositories<'a>(&'a self, organization: &Organization) -> Listing<'a, Repository> {
        let repos = self
            .state
            .borrow()
            .repositories
            .get(&organization.login)
            .cloned()
            .unwrap_or_default();
        Box::new(repos.into_iter().map(Ok))
    }

    fn repository(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Repository, GatewayError> {
        self.state
            .borrow()
            .repositories
            .get(&organization.login)
            .and_then(|repos| repos.iter().find(|r| r.name == name).cloned())
            .ok_or_else(|| Self::not_found(format!("mem://repos/{}/{name}", organization.login)))
    }

    fn labels<'a>(&'a self, repository: &Repository) -> Listing<'a, RemoteLabel> {
        let full_name = repository.full_name.clone();
        let Some(size) = self.page_size else {
            let labels = self
                .state
                .borrow()
                .labels
                .get(&full_name)
                .cloned()
                .unwrap_or_default();
            return Box::new(labels.into_iter().map(Ok));
        };

        let mut page = 0;
        let mut buffer = VecDeque::new();
        let mut exhausted = false;
        Box::new(std::iter::from_fn(move || loop {
            if let Some(label) = buffer.pop_front() {
                return Some(Ok(label));
            }
            if exhausted {
                return None;
            }
            let chunk: Vec<RemoteLabel> = self
                .state
                .borrow()
                .labels
                .get(&full_name)
                .map(|labels| labels.iter().skip(page * size).take(size).cloned().collect())
                .unwrap_or_default();
            page += 1;
            self.pages_served.set(self.pages_served.get() + 1);
            exhausted = chunk.len() < size;
            buffer.extend(chunk);
        }))
    }

    fn update_label(
        &self,
        label: &RemoteLabel,
        patch: &LabelPatch,
    ) -> Result<RemoteLabel, GatewayError> {
        self.check(Method::Patch, &label.url)?;
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Update {
            url: label.url.clone(),
            patch: patch.clone(),
        });
        let stored = state
            .labels
            .get_mut(&label.repository)
            .and_then(|labels| labels.iter_mut().find(|l| l.url == label.url))
            .ok_or_else(|| Self::not_found(label.url.clone()))?;
        patch.apply(stored);
        stored.url = label_url(&stored.repository, &stored.name);
        Ok(stored.clone())
    }

    fn delete_label(&self, label: &RemoteLabel) -> Result<(), GatewayError> {
        self.check(Method::Delete, &label.url)?;
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Delete {
            url: label.url.clone(),
        });
        if let Some(labels) = state.labels.get_mut(&label.repository) {
            labels.retain(|l| l.url != label.url);
        }
        Ok(())
    }

    fn create_label(
        &self,
        repository: &Repository,
        label: &ReferenceLabel,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.borrow_mut();
        let taken = state
            .labels
            .get(&repository.full_name)
            .is_some_and(|labels| labels.iter().any(|l| l.name.eq_ignore_ascii_case(&label.name)));
        if taken {
            return Err(GatewayError::Status {
                method: Method::Post,
                url: format!("mem://{}/labels", repository.full_name),
                status: 422,
            });
        }
        state.calls.push(Call::Create {
            repository: repository.full_name.clone(),
            name: label.name.clone(),
            color: label.color.clone(),
        });
        state
            .labels
            .entry(repository.full_name.clone())
            .or_default()
            .push(RemoteLabel {
                name: label.name.clone(),
                color: label.color.clone(),
                url: label_url(&repository.full_name, &label.name),
                repository: repository.full_name.clone(),
            });
        Ok(())
    }
}
