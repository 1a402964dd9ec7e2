//! The editor's single source of truth.
//!
//! `EditorState` exclusively owns the current layout tree; every component
//! of the engine takes and returns values, so there is no other holder of a
//! mutable copy. Edits go through the command stack (undo/redo included);
//! saves go through the store boundary and update the base revision only on
//! success.

use crate::commands::{CommandStack, EditOp};
use crate::store::{LayoutStore, StoreError};
use lyt_core::{LayoutDocument, LayoutTree, NodeId, TreeError, ViewNode};
use std::sync::Arc;

const DEFAULT_UNDO_DEPTH: usize = 100;

/// Owned editor state for one open layout document.
pub struct EditorState {
    layout_id: String,
    name: String,
    /// Store revision the current document is based on.
    revision: u64,
    tree: LayoutTree,
    selected: Option<NodeId>,
    commands: CommandStack,
}

impl EditorState {
    /// Open a layout from the store.
    pub fn open(store: &dyn LayoutStore, layout_id: &str) -> Result<Self, StoreError> {
        let doc = store.load(layout_id)?;
        log::debug!(
            "opened layout {:?} rev {} ({} nodes)",
            doc.id,
            doc.revision,
            doc.tree.node_count()
        );
        Ok(Self {
            layout_id: doc.id,
            name: doc.name,
            revision: doc.revision,
            tree: doc.tree,
            selected: None,
            commands: CommandStack::new(DEFAULT_UNDO_DEPTH),
        })
    }

    /// Start from an already-decoded document (new layouts, tests).
    pub fn from_document(doc: LayoutDocument) -> Self {
        Self {
            layout_id: doc.id,
            name: doc.name,
            revision: doc.revision,
            tree: doc.tree,
            selected: None,
            commands: CommandStack::new(DEFAULT_UNDO_DEPTH),
        }
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// The selected node in the current tree version. `None` both when
    /// nothing is selected and when the selection no longer exists.
    pub fn selected_node(&self) -> Option<&Arc<ViewNode>> {
        self.tree.find(self.selected?)
    }

    /// Select a node. A vanished id falls back to "no selection" and
    /// returns false.
    pub fn select(&mut self, id: NodeId) -> bool {
        if self.tree.contains(id) {
            self.selected = Some(id);
            true
        } else {
            log::debug!("selection fell back to none: {id} not in tree");
            self.selected = None;
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply one edit through the command stack.
    ///
    /// On failure the previous tree stays in place untouched. If the edit
    /// removed the selected node, the selection is cleared.
    pub fn apply(&mut self, op: EditOp, description: &str) -> Result<(), TreeError> {
        self.commands.execute(&mut self.tree, op, description)?;
        self.reconcile_selection();
        Ok(())
    }

    /// Undo the last edit; returns its description.
    pub fn undo(&mut self) -> Result<Option<String>, TreeError> {
        let desc = self.commands.undo(&mut self.tree)?;
        self.reconcile_selection();
        Ok(desc)
    }

    /// Redo the last undone edit; returns its description.
    pub fn redo(&mut self) -> Result<Option<String>, TreeError> {
        let desc = self.commands.redo(&mut self.tree)?;
        self.reconcile_selection();
        Ok(desc)
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    /// The current document, as it would be persisted.
    pub fn document(&self) -> LayoutDocument {
        LayoutDocument {
            id: self.layout_id.clone(),
            name: self.name.clone(),
            revision: self.revision,
            tree: self.tree.clone(),
        }
    }

    /// Persist the whole document. On success the editor's base revision
    /// advances; on [`StoreError::StaleRevision`] the tree stays as-is so
    /// the curator can reload and re-apply.
    pub fn save(&mut self, store: &mut dyn LayoutStore) -> Result<u64, StoreError> {
        let new_revision = store.save(&self.document())?;
        self.revision = new_revision;
        Ok(new_revision)
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = self.selected
            && !self.tree.contains(id)
        {
            self.selected = None;
        }
    }
}
