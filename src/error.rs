// WHY: Load-time failures must name the offending file and line so a broken
// resource never silently changes scoring output

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building a [`crate::SentimentScorer`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// Resource file missing, unreadable, or not valid UTF-8
    #[error("resource load failure: cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lexicon line without a value field
    #[error(
        "resource load failure: {}:{line}: expected at least 2 tab-separated fields, found {found}",
        .path.display()
    )]
    MissingValue {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// Lexicon value field that is not a finite number
    #[error("resource load failure: {}:{line}: invalid polarity value {value:?}", .path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// Word-splitting pattern failed to compile
    #[error("tokenizer pattern failed to compile: {0}")]
    Pattern(#[from] regex_automata::meta::BuildError),
}

impl LoadError {
    /// Path of the resource that caused the failure, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::Io { path, .. }
            | LoadError::MissingValue { path, .. }
            | LoadError::InvalidValue { path, .. } => Some(path.as_path()),
            LoadError::Pattern(_) => None,
        }
    }

    /// 1-based line number for malformed lexicon lines
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::MissingValue { line, .. } | LoadError::InvalidValue { line, .. } => Some(*line),
            _ => None,
        }
    }
}
