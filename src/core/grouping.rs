//! Grouping store: accumulate paths under their content-type label.
//!
//! The store is append-only while the walk runs and is consumed exactly once
//! by [`GroupingStore::drain`].  Buckets come out in ascending (byte-wise)
//! label order; paths inside a bucket keep the order they were added in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ───────────────────────────────────────── bucket ────────────

/// Paths sharing one label, in visit order.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    paths: Vec<PathBuf>,
}

impl Bucket {
    /// Paths in the order they were added (first visited first).
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

// ───────────────────────────────────────── store ─────────────

/// Ordered map `label -> bucket`.
///
/// Every label and path is copied in, so callers may reuse their buffers as
/// soon as [`add`](Self::add) returns.
#[derive(Debug, Default)]
pub struct GroupingStore {
    buckets: BTreeMap<String, Bucket>,
    paths: usize,
}

impl GroupingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the bucket for `label`, creating the bucket if needed.
    pub fn add(&mut self, label: &str, path: &Path) {
        let owned = path.to_path_buf();
        // Only allocate the label the first time it is seen.
        match self.buckets.get_mut(label) {
            Some(bucket) => bucket.paths.push(owned),
            None => {
                self.buckets.insert(
                    label.to_owned(),
                    Bucket {
                        paths: vec![owned],
                    },
                );
            }
        }
        self.paths += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of paths across all buckets.
    pub fn path_count(&self) -> usize {
        self.paths
    }

    /// Visit every bucket once, in ascending label order, consuming the store.
    ///
    /// Stops at the first error returned by `visit`.
    pub fn drain<F, E>(self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str, &Bucket) -> Result<(), E>,
    {
        for (label, bucket) in &self.buckets {
            debug_assert!(!bucket.is_empty());
            visit(label, bucket)?;
        }
        Ok(())
    }
}
