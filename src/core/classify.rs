//! Content-type detection boundary.
//!
//! The walker only ever asks a [`Classifier`] about non-empty regular files;
//! everything else gets a fixed label without touching the backend.

use std::path::Path;

use super::error::{ClassifyError, ListError};
use super::fs::EntryKind;

/// Label for zero-byte regular files.
pub const EMPTY_FILE_LABEL: &str = "inode/x-empty";

/// Label for every symlink, live or broken.
pub const SYMLINK_LABEL: &str = "inode/symlink";

/// Something that can put a content-type label on a file.
pub trait Classifier {
    fn classify(
        &mut self,
        path: &Path,
        size: u64,
        kind: EntryKind,
    ) -> Result<String, ClassifyError>;
}

impl<C: Classifier + ?Sized> Classifier for &mut C {
    fn classify(
        &mut self,
        path: &Path,
        size: u64,
        kind: EntryKind,
    ) -> Result<String, ClassifyError> {
        (**self).classify(path, size, kind)
    }
}

// ───────────────────────────────────────── shared-mime-info ──

/// Classifier backed by the shared-mime-info database via `tree_magic_mini`.
#[derive(Debug)]
pub struct MagicClassifier {
    _private: (),
}

/// Signature used to check that the MIME database is actually loaded.
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

impl MagicClassifier {
    /// Load the backend.  Fails if the MIME database is missing, since every
    /// lookup would then degrade to a generic type.
    pub fn open() -> Result<Self, ListError> {
        let probe = tree_magic_mini::from_u8(PNG_SIGNATURE);
        if probe != "image/png" {
            return Err(ListError::Backend {
                message: format!("MIME database not available (probe detected {probe:?})"),
            });
        }
        tracing::debug!("content-type database loaded");
        Ok(Self { _private: () })
    }
}

impl Classifier for MagicClassifier {
    fn classify(
        &mut self,
        path: &Path,
        _size: u64,
        _kind: EntryKind,
    ) -> Result<String, ClassifyError> {
        // Uses magic signatures for content-based detection, not extension
        // matching.  `None` means the file could not be opened or read.
        tree_magic_mini::from_filepath(path)
            .map(str::to_string)
            .ok_or_else(|| ClassifyError::new("file could not be read"))
    }
}
