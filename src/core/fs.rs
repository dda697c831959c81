//! Filesystem traversal: walk a root physically and label what it contains.
//!
//! Symlinks are never followed, not even for the root itself.  Entries
//! within a directory are visited in file-name order so the listing is
//! stable across filesystems.

use std::ffi::OsStr;
use std::path::Path;

use walkdir::WalkDir;

use super::classify::{Classifier, EMPTY_FILE_LABEL, SYMLINK_LABEL};
use super::error::{ListError, WalkWarning};
use super::grouping::GroupingStore;

/// Configuration knobs for the traversal.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Visit dot-prefixed entries instead of skipping (or pruning) them.
    pub include_hidden: bool,
    /// A root that cannot be opened is a warning rather than fatal.
    pub ignore_inaccessible_roots: bool,
}

/// What an entry is, judged without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Symlink,
    Dir,
    /// Devices, sockets, fifos.
    Other,
}

impl From<std::fs::FileType> for EntryKind {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Per-node traversal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    SkipEntry,
    SkipSubtree,
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

fn is_dot_artifact(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Decide how to treat one entry.
///
/// `is_root` marks an explicit root argument, which is never checked for a
/// leading dot itself.
pub fn decide(name: &OsStr, kind: EntryKind, is_root: bool, config: &WalkConfig) -> Visit {
    let hidden = !config.include_hidden && !is_root && is_hidden(name);
    match kind {
        EntryKind::File | EntryKind::Symlink if hidden => Visit::SkipEntry,
        EntryKind::File | EntryKind::Symlink => Visit::Continue,
        EntryKind::Dir if is_dot_artifact(name) => Visit::Continue,
        EntryKind::Dir if hidden => Visit::SkipSubtree,
        EntryKind::Dir => Visit::Continue,
        EntryKind::Other => Visit::SkipEntry,
    }
}

// ───────────────────────────────────────── walker ────────────

/// Walks roots, labels eligible entries, and records them in a store.
///
/// Borrows its collaborators from the owning session for the duration of
/// one root.
pub struct TreeWalker<'a, C: Classifier> {
    pub config: &'a WalkConfig,
    pub classifier: &'a mut C,
    pub store: &'a mut GroupingStore,
    pub warnings: &'a mut Vec<WalkWarning>,
}

impl<C: Classifier> TreeWalker<'_, C> {
    /// Walk everything physically reachable from `root`.
    ///
    /// Returns the number of entries added to the store.  Unreadable entries
    /// below the root are warnings; an unreadable root is fatal unless
    /// `ignore_inaccessible_roots` is set.
    pub fn walk(&mut self, root: &Path) -> Result<usize, ListError> {
        let mut added = 0;
        let mut it = WalkDir::new(root)
            .follow_links(false)
            .follow_root_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = it.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf);
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                    match path {
                        Some(p) if p == root => {
                            self.root_failure(root, source)?;
                            break;
                        }
                        Some(p) => self.warn(WalkWarning::read_error(&p, &source)),
                        None => self.warn(WalkWarning::read_error(root, &source)),
                    }
                    continue;
                }
            };

            let kind = EntryKind::from(entry.file_type());
            let visit = decide(entry.file_name(), kind, entry.depth() == 0, self.config);
            tracing::trace!(path = %entry.path().display(), ?kind, ?visit, "visit");

            match visit {
                Visit::SkipSubtree => {
                    it.skip_current_dir();
                    continue;
                }
                Visit::SkipEntry => continue,
                Visit::Continue => {}
            }

            let path = entry.path();
            match kind {
                EntryKind::Symlink => self.store.add(SYMLINK_LABEL, path),
                EntryKind::File => {
                    let size = match entry.metadata() {
                        Ok(meta) => meta.len(),
                        Err(err) => {
                            let source = err
                                .into_io_error()
                                .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                            self.warn(WalkWarning::metadata_error(path, &source));
                            continue;
                        }
                    };
                    if size == 0 {
                        self.store.add(EMPTY_FILE_LABEL, path);
                    } else {
                        let label = self.classifier.classify(path, size, kind).map_err(|e| {
                            ListError::Classify {
                                path: path.to_path_buf(),
                                reason: e.reason,
                            }
                        })?;
                        self.store.add(&label, path);
                    }
                }
                EntryKind::Dir | EntryKind::Other => continue,
            }
            added += 1;
        }

        Ok(added)
    }

    fn root_failure(&mut self, root: &Path, source: std::io::Error) -> Result<(), ListError> {
        if self.config.ignore_inaccessible_roots {
            self.warn(WalkWarning::skipped_root(root, &source));
            Ok(())
        } else {
            Err(ListError::RootInaccessible {
                path: root.to_path_buf(),
                source,
            })
        }
    }

    fn warn(&mut self, warning: WalkWarning) {
        tracing::warn!(kind = ?warning.kind, "{warning}");
        self.warnings.push(warning);
    }
}
