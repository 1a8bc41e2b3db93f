//! Domain types for label synchronization.
//!
//! Remote entities are fetched fresh on every run and never persisted.
//! Colors travel as six-digit hex strings; [`Rgb`] is the parsed form used by
//! the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// A color split into its red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    /// Parse a `RRGGBB` hex string. A leading `#` is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, ReferenceError> {
        let digits = strip_hash(hex);
        let invalid = || ReferenceError::InvalidColor {
            color: hex.trim().to_owned(),
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| invalid());
        Ok(Self {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
        })
    }
}

impl FromStr for Rgb {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Compare two hex colors, ignoring ASCII case and a leading `#`.
pub fn colors_match(a: &str, b: &str) -> bool {
    strip_hash(a).eq_ignore_ascii_case(strip_hash(b))
}

fn strip_hash(color: &str) -> &str {
    let color = color.trim();
    color.strip_prefix('#').unwrap_or(color)
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// A canonical label: the name and color a repository label should converge to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLabel {
    /// Lowercase, unique within a [`ReferenceSet`](crate::ReferenceSet).
    pub name: String,
    pub color: String,
}

impl ReferenceLabel {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A label as stored on the remote service.
///
/// `name` and `color` are updated in place after each successful remote write,
/// so later classification and logging see the live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLabel {
    pub name: String,
    pub color: String,
    /// Opaque address used for patch and delete calls.
    pub url: String,
    /// `full_name` of the owning repository.
    pub repository: String,
}

impl RemoteLabel {
    /// The history key for this label: its current name, lowercased.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Parsed channels, or `None` when the remote color is not valid hex.
    pub fn rgb(&self) -> Option<Rgb> {
        Rgb::from_hex(&self.color).ok()
    }
}

/// Fields to change on a remote label. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelPatch {
    #[serde(rename = "new_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LabelPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn recolor(color: impl Into<String>) -> Self {
        Self {
            name: None,
            color: Some(color.into()),
        }
    }

    /// Apply the patch to a local copy after the remote write succeeded.
    pub fn apply(&self, label: &mut RemoteLabel) {
        if let Some(name) = &self.name {
            label.name = name.clone();
        }
        if let Some(color) = &self.color {
            label.color = color.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts and repositories
// ---------------------------------------------------------------------------

/// An account (organization or user) whose repositories are synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub login: String,
    /// Address of the first page of the account's repository listing.
    pub repos_url: String,
}

/// A repository; immutable once constructed from a listing or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    pub full_name: String,
    pub name: String,
    /// Login of the owning account.
    pub owner: String,
}

impl Repository {
    /// True when `excludes` names this repository by `full_name` or bare `name`.
    pub fn is_excluded(&self, excludes: &[String]) -> bool {
        excludes
            .iter()
            .any(|e| *e == self.full_name || *e == self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.full_name.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
