//! Store boundary: whole-document load/save with explicit revision checks.
//!
//! The external store trades in full JSON documents, never patches. Saves
//! carry the revision the editor loaded; a save against a moved-on store is
//! rejected with [`StoreError::StaleRevision`] instead of silently letting
//! the last writer win. The editor surfaces the error and keeps its tree.

use lyt_core::{DocError, LayoutDocument, decode_document, encode_document};
use std::collections::HashMap;
use thiserror::Error;

/// Errors crossing the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No layout with this id in the store.
    #[error("no layout {id:?} in the store")]
    NotFound {
        /// The requested layout id.
        id: String,
    },

    /// The document's base revision is behind the store.
    #[error("stale save: based on revision {have}, store is at {latest}")]
    StaleRevision {
        /// Revision the editor loaded.
        have: u64,
        /// Revision the store holds now.
        latest: u64,
    },

    /// The stored document failed to decode/encode.
    #[error(transparent)]
    Doc(#[from] DocError),
}

/// Whole-document persistence for layouts.
pub trait LayoutStore {
    /// Fetch a layout document by id.
    fn load(&self, layout_id: &str) -> Result<LayoutDocument, StoreError>;

    /// Persist the whole document. Succeeds only when `doc.revision` equals
    /// the store's latest revision for that id; returns the new revision.
    fn save(&mut self, doc: &LayoutDocument) -> Result<u64, StoreError>;
}

/// In-memory store for tests and demos. Documents are kept as encoded JSON,
/// the way a remote store would hold them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    layouts: HashMap<String, (u64, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an encoded document; returns its layout id.
    pub fn put(&mut self, json: &str) -> Result<String, StoreError> {
        let doc = decode_document(json)?;
        self.layouts
            .insert(doc.id.clone(), (doc.revision, json.to_string()));
        Ok(doc.id)
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self, layout_id: &str) -> Result<LayoutDocument, StoreError> {
        let (revision, json) = self.layouts.get(layout_id).ok_or_else(|| {
            StoreError::NotFound {
                id: layout_id.to_string(),
            }
        })?;
        let mut doc = decode_document(json)?;
        doc.revision = *revision;
        Ok(doc)
    }

    fn save(&mut self, doc: &LayoutDocument) -> Result<u64, StoreError> {
        let latest = self
            .layouts
            .get(&doc.id)
            .map(|(revision, _)| *revision)
            .unwrap_or(doc.revision);
        if latest != doc.revision {
            log::warn!(
                "rejecting stale save of layout {:?}: base {} vs latest {latest}",
                doc.id,
                doc.revision
            );
            return Err(StoreError::StaleRevision {
                have: doc.revision,
                latest,
            });
        }

        let next = latest + 1;
        let mut saved = doc.clone();
        saved.revision = next;
        let json = encode_document(&saved)?;
        self.layouts.insert(doc.id.clone(), (next, json));
        log::debug!("saved layout {:?} at revision {next}", doc.id);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyt_core::{LayoutTree, NodeId, ViewNode, Widget};
    use pretty_assertions::assert_eq;

    fn doc(revision: u64) -> LayoutDocument {
        LayoutDocument {
            id: "layout-1".to_string(),
            name: "Test".to_string(),
            revision,
            tree: LayoutTree::new(ViewNode::new(NodeId::intern("root"), Widget::FrameLayout)),
        }
    }

    #[test]
    fn save_bumps_the_revision() {
        let mut store = MemoryStore::new();
        let rev = store.save(&doc(0)).unwrap();
        assert_eq!(rev, 1);

        let loaded = store.load("layout-1").unwrap();
        assert_eq!(loaded.revision, 1);
    }

    #[test]
    fn stale_base_revision_is_rejected() {
        let mut store = MemoryStore::new();
        store.save(&doc(0)).unwrap(); // store now at 1

        let err = store.save(&doc(0)).unwrap_err();
        match err {
            StoreError::StaleRevision { have, latest } => {
                assert_eq!((have, latest), (0, 1));
            }
            other => panic!("expected StaleRevision, got {other}"),
        }

        // The fresh base succeeds.
        assert_eq!(store.save(&doc(1)).unwrap(), 2);
    }

    #[test]
    fn missing_layout_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load("nope").unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
