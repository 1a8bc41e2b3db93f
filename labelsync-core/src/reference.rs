//! The reference label set: canonical `name -> color` pairs for one run.
//!
//! # Sources
//!
//! Exactly one source is active per run:
//! - [`ReferenceSet::builtin`]: the default list below
//! - [`ReferenceSet::load_at`]: a file with one `name,color` pair per line
//!
//! # Validation
//!
//! Names are lowercased on load and must be unique. Colors must be six hex
//! digits and must also be unique: renamed-label detection maps a color back
//! to exactly one canonical name.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::ReferenceError;
use crate::types::{colors_match, ReferenceLabel, Rgb};

/// Default labels used when no reference file is given.
pub const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("architecture", "2b2026"),
    ("blocking", "b60205"),
    ("bug", "ee0701"),
    ("ci", "8d8d00"),
    ("deployment", "656b75"),
    ("documentation", "fbca04"),
    ("draft", "ff9600"),
    ("duplicate", "cccccc"),
    ("enhancement", "84b6eb"),
    ("feature", "c2e0c6"),
    ("functionality test", "fef2c0"),
    ("graphical prototype", "ff4650"),
    ("graphical design", "7c6bd6"),
    ("graphical wireframe", "d50745"),
    ("invalid", "e6e6e6"),
    ("layout", "f9d0c4"),
    ("pending", "6519e7"),
    ("question", "cc317c"),
    ("revise", "ff04e4"),
    ("rest story", "e1b4c9"),
    ("r&d", "d4c5f9"),
    ("user interface", "651213"),
    ("wontfix", "ffffff"),
];

/// Canonical labels keyed by lowercase name, in source order.
///
/// Immutable once built; shared read-only across every repository of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet {
    labels: IndexMap<String, String>,
}

impl ReferenceSet {
    /// The built-in default list.
    pub fn builtin() -> Self {
        Self {
            labels: BUILTIN_LABELS
                .iter()
                .map(|(name, color)| ((*name).to_owned(), (*color).to_owned()))
                .collect(),
        }
    }

    /// Build a validated set from `(name, color)` pairs.
    pub fn from_pairs<I, N, C>(pairs: I) -> Result<Self, ReferenceError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut labels: IndexMap<String, String> = IndexMap::new();
        for (name, color) in pairs {
            let name = name.as_ref().trim().to_lowercase();
            let color = color.as_ref().trim();
            let color = color.strip_prefix('#').unwrap_or(color).to_owned();
            Rgb::from_hex(&color)?;

            if labels.contains_key(&name) {
                return Err(ReferenceError::DuplicateName { name });
            }
            if let Some((first, _)) = labels.iter().find(|(_, c)| colors_match(c, &color)) {
                return Err(ReferenceError::DuplicateColor {
                    color,
                    first: first.clone(),
                    second: name,
                });
            }
            labels.insert(name, color);
        }
        if labels.is_empty() {
            return Err(ReferenceError::Empty);
        }
        Ok(Self { labels })
    }

    /// Parse `name,color` lines. `origin` is only used in error messages.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn parse(source: &str, origin: &Path) -> Result<Self, ReferenceError> {
        let mut pairs = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parse_err = |message: &str| ReferenceError::Parse {
                path: origin.to_path_buf(),
                line: index + 1,
                message: message.to_owned(),
            };
            let (name, color) = line
                .split_once(',')
                .ok_or_else(|| parse_err("expected `name,color`"))?;
            if name.trim().is_empty() {
                return Err(parse_err("label name is empty"));
            }
            if color.contains(',') {
                return Err(parse_err("too many fields; expected `name,color`"));
            }
            pairs.push((name, color));
        }
        Self::from_pairs(pairs)
    }

    /// Load a reference file from disk.
    pub fn load_at(path: &Path) -> Result<Self, ReferenceError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether `name` (any casing) is canonical.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(&name.to_lowercase())
    }

    /// Canonical color for `name` (any casing).
    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.labels.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The canonical name whose color equals `color`.
    ///
    /// Colors are unique by construction, so at most one name matches.
    pub fn name_for_color(&self, color: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(_, c)| colors_match(c, color))
            .map(|(name, _)| name.as_str())
    }

    /// Canonical labels in source order.
    pub fn iter(&self) -> impl Iterator<Item = ReferenceLabel> + '_ {
        self.labels
            .iter()
            .map(|(name, color)| ReferenceLabel::new(name.clone(), color.clone()))
    }
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self::builtin()
    }
}
