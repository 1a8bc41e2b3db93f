//! Error types for labelsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while building or loading a reference label set.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The reference file could not be read.
    #[error("failed to read reference list at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the reference file is not a `name,color` pair.
    #[error("failed to parse reference list at {path}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A color is not six hexadecimal digits.
    #[error("invalid color '{color}'; expected six hex digits such as EE0701")]
    InvalidColor { color: String },

    /// Two entries share a (lowercased) name.
    #[error("label '{name}' is listed more than once")]
    DuplicateName { name: String },

    /// Two entries share a color, which would make renamed-label detection ambiguous.
    #[error("labels '{first}' and '{second}' share color #{color}")]
    DuplicateColor {
        color: String,
        first: String,
        second: String,
    },

    /// The reference list contains no labels.
    #[error("reference list is empty")]
    Empty,
}
