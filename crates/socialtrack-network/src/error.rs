//! Load error types for socialtrack-network.
//!
//! [`LoadError`] covers every way reading a social network description can
//! fail: wrong file kind, I/O, malformed DOT text, and graph insertions the
//! core store refuses.

use std::path::PathBuf;

use socialtrack_core::CoreError;
use thiserror::Error;

/// Errors produced while loading a network from DOT text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not name a `.dot` file.
    #[error("not a DOT file: {}", path.display())]
    NotDot { path: PathBuf },

    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input held nothing but blank lines and comments.
    #[error("empty input: no graph header found")]
    Empty,

    /// A line could not be parsed. `line` is 1-based.
    #[error("line {line}: {reason}: `{text}`")]
    Syntax {
        line: usize,
        text: String,
        reason: String,
    },

    /// The input ended before the graph's closing brace.
    #[error("unterminated graph: missing closing `}}`")]
    Unterminated,

    /// The graph store rejected a statement (for example an undeclared user
    /// under the reject endpoint policy).
    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: CoreError,
    },
}

impl LoadError {
    pub(crate) fn syntax(line: usize, text: &str, reason: impl Into<String>) -> Self {
        LoadError::Syntax {
            line,
            text: text.trim().to_string(),
            reason: reason.into(),
        }
    }
}
