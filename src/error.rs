//! Error types for the translation core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the translation core.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Mixed EOL styles were encountered with `repair=false`.
    #[error("inconsistent line endings in {path:?}: expected {expected}, found {found}")]
    InconsistentEol {
        /// Path of the file being translated, if known.
        path: Option<PathBuf>,
        /// The EOL style established by the first line terminator seen.
        expected: &'static str,
        /// The conflicting EOL style encountered later.
        found: &'static str,
    },

    /// A special-file identifier other than `link`, or a platform that
    /// cannot create the requested special file.
    #[error("unsupported special file feature: {0}")]
    UnsupportedFeature(String),

    /// Transcoding failed and the caller did not request a fuzzy fallback.
    #[error("invalid encoding while transcoding: {0}")]
    InvalidEncoding(String),

    /// Both `eol_out` and `keywords` were absent.
    #[error("precondition violated: translate() requires eol_out and/or keywords to be set")]
    Precondition,

    /// Propagated I/O failure from an underlying stream or the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Build an [`TranslateError::InconsistentEol`] with no path context.
    pub fn inconsistent_eol(expected: &'static str, found: &'static str) -> Self {
        Self::InconsistentEol {
            path: None,
            expected,
            found,
        }
    }

    /// Attach a path to an existing [`TranslateError::InconsistentEol`].
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        if let Self::InconsistentEol { path: p, .. } = &mut self {
            *p = Some(path.into());
        }
        self
    }

    /// Build an [`TranslateError::UnsupportedFeature`] for an unknown special-file identifier.
    pub fn unknown_special_identifier(identifier: impl Into<String>) -> Self {
        Self::UnsupportedFeature(format!("unknown special file identifier {:?}", identifier.into()))
    }

    /// Build an [`TranslateError::UnsupportedFeature`] for a platform without symlink support.
    pub fn symlinks_unsupported() -> Self {
        Self::UnsupportedFeature("symbolic links are not supported on this platform".to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TranslateError>;
