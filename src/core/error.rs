//! Error and warning types for a listing run.
//!
//! Anything in [`ListError`] aborts the run.  [`WalkWarning`]s are logged and
//! collected, but never change the outcome.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal conditions.  Every variant terminates the run with a diagnostic.
#[derive(Debug, Error)]
pub enum ListError {
    /// The classifier backend could not be initialised.
    #[error("failed to initialise content-type detection: {message}")]
    Backend { message: String },

    /// A non-empty regular file could not be classified.
    #[error("cannot classify \"{}\": {reason}", path.display())]
    Classify { path: PathBuf, reason: String },

    /// A root argument could not be opened.
    #[error("cannot open \"{}\"", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No entry was classified across all roots.
    #[error("Nothing to list")]
    NothingToList,

    /// Writing records to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Classification failure for a single file.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct ClassifyError {
    pub reason: String,
}

impl ClassifyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A directory or entry was not accessible.
    PermissionDenied,
    /// A directory could not be listed for another reason.
    ReadError,
    /// An entry's metadata could not be read (often: it vanished mid-walk).
    MetadataError,
    /// A root argument was skipped because ignore mode is on.
    SkippedRoot,
}

/// Non-fatal problem encountered while walking.
#[derive(Debug, Clone)]
pub struct WalkWarning {
    pub path: PathBuf,
    pub message: String,
    pub kind: WarningKind,
}

impl WalkWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Classify an I/O error hit while reading a directory.
    pub fn read_error(path: &Path, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::new(
                path,
                "Permission denied",
                WarningKind::PermissionDenied,
            ),
            _ => Self::new(
                path,
                format!("cannot read directory: {error}"),
                WarningKind::ReadError,
            ),
        }
    }

    pub fn metadata_error(path: &Path, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            _ => WarningKind::MetadataError,
        };
        Self::new(path, format!("cannot stat: {error}"), kind)
    }

    pub fn skipped_root(path: &Path, error: &std::io::Error) -> Self {
        Self::new(path, format!("skipped: {error}"), WarningKind::SkippedRoot)
    }
}

impl fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_permission_denied() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = WalkWarning::read_error(Path::new("/srv/locked"), &err);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert_eq!(warning.to_string(), "/srv/locked: Permission denied");
    }

    #[test]
    fn test_metadata_error_vanished() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let warning = WalkWarning::metadata_error(Path::new("tmp/x"), &err);
        assert_eq!(warning.kind, WarningKind::MetadataError);
        assert!(warning.to_string().starts_with("tmp/x: cannot stat"));
    }

    #[test]
    fn test_classify_error_names_path() {
        let err = ListError::Classify {
            path: PathBuf::from("data/blob.bin"),
            reason: "unreadable".into(),
        };
        assert_eq!(err.to_string(), "cannot classify \"data/blob.bin\": unreadable");
    }

    #[test]
    fn test_root_inaccessible_reports_cause_once() {
        use std::error::Error as _;

        let err = ListError::RootInaccessible {
            path: PathBuf::from("missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such entry"),
        };
        assert_eq!(err.to_string(), "cannot open \"missing\"");
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(cause.as_deref(), Some("no such entry"));
    }
}
