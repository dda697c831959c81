//! One listing run: walk every root, then emit the grouped result once.
//!
//! The session owns the classifier handle and the grouping store for the
//! whole run, so several runs can coexist in one process.

use std::io::Write;
use std::path::Path;

use super::classify::Classifier;
use super::emit::{EmitConfig, Emitter};
use super::error::{ListError, WalkWarning};
use super::fs::{TreeWalker, WalkConfig};
use super::grouping::GroupingStore;

pub struct Session<C: Classifier> {
    config: WalkConfig,
    classifier: C,
    store: GroupingStore,
    warnings: Vec<WalkWarning>,
}

impl<C: Classifier> Session<C> {
    pub fn new(config: WalkConfig, classifier: C) -> Self {
        Self {
            config,
            classifier,
            store: GroupingStore::new(),
            warnings: Vec::new(),
        }
    }

    /// Walk one root, adding its entries to the store.
    pub fn walk(&mut self, root: &Path) -> Result<(), ListError> {
        let added = TreeWalker {
            config: &self.config,
            classifier: &mut self.classifier,
            store: &mut self.store,
            warnings: &mut self.warnings,
        }
        .walk(root)?;
        tracing::debug!(root = %root.display(), added, "root walked");
        Ok(())
    }

    /// Warnings raised so far, in the order they occurred.
    pub fn warnings(&self) -> &[WalkWarning] {
        &self.warnings
    }

    #[cfg(test)]
    pub fn store(&self) -> &GroupingStore {
        &self.store
    }

    /// Drain the store into `out`, returning the number of records written.
    ///
    /// Fails with [`ListError::NothingToList`] without writing anything when
    /// no entry was labelled.
    pub fn finish<W: Write>(self, out: W, emit: EmitConfig) -> Result<usize, ListError> {
        if self.store.is_empty() {
            return Err(ListError::NothingToList);
        }
        tracing::debug!(
            labels = self.store.label_count(),
            paths = self.store.path_count(),
            warnings = self.warnings.len(),
            "emitting listing"
        );

        let mut emitter = Emitter::new(out, emit);
        self.store.drain(|label, bucket| {
            tracing::trace!(label, paths = bucket.len(), "bucket");
            bucket.paths().try_for_each(|path| emitter.emit(label, path))
        })?;
        Ok(emitter.finish()?)
    }
}
