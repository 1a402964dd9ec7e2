//! Edit operations and the undo/redo command stack.
//!
//! Every mutation of the layout tree is an [`EditOp`]. Applying one yields
//! the new tree *and* the inverse op, captured against the pre-edit tree;
//! the stack stores both so undo is a plain re-apply. Ops address nodes by
//! id, never by path, so a queued undo stays valid across index shifts.

use lyt_core::{
    LayoutTree, NodeId, Property, TreeError, ViewNode, insert_child_at, node_at, resolve_path,
};
use std::sync::Arc;

/// One user-visible edit to the layout tree.
#[derive(Debug, Clone)]
pub enum EditOp {
    /// Set (add or overwrite) a property on a node.
    SetProperty { id: NodeId, property: Property },
    /// Remove a property from a node. Removing an absent name is a no-op.
    RemoveProperty { id: NodeId, name: String },
    /// Change a node's display name.
    Rename { id: NodeId, name: Option<String> },
    /// Insert a new widget under `parent` at `index`.
    InsertChild {
        parent: NodeId,
        index: usize,
        node: Arc<ViewNode>,
    },
    /// Delete a node (and its subtree).
    RemoveNode { id: NodeId },
}

impl EditOp {
    /// The node this op targets (for selection upkeep).
    pub fn target(&self) -> NodeId {
        match self {
            EditOp::SetProperty { id, .. }
            | EditOp::RemoveProperty { id, .. }
            | EditOp::Rename { id, .. }
            | EditOp::RemoveNode { id } => *id,
            EditOp::InsertChild { node, .. } => node.id,
        }
    }
}

/// Apply `op` to `tree`, returning the new tree and the inverse op.
///
/// Pure: `tree` is untouched on error, and nothing is partially applied.
pub fn apply_op(tree: &LayoutTree, op: &EditOp) -> Result<(LayoutTree, EditOp), TreeError> {
    match op {
        EditOp::SetProperty { id, property } => {
            let node = tree.find(*id).ok_or(TreeError::NodeNotFound { id: *id })?;
            let inverse = match node.properties.iter().find(|p| p.name == property.name) {
                Some(old) => EditOp::SetProperty {
                    id: *id,
                    property: old.clone(),
                },
                None => EditOp::RemoveProperty {
                    id: *id,
                    name: property.name.clone(),
                },
            };
            let updated = node.with_property(property.clone());
            Ok((tree.replace_node(*id, updated)?, inverse))
        }
        EditOp::RemoveProperty { id, name } => {
            let node = tree.find(*id).ok_or(TreeError::NodeNotFound { id: *id })?;
            let inverse = match node.properties.iter().find(|p| &p.name == name) {
                Some(old) => EditOp::SetProperty {
                    id: *id,
                    property: old.clone(),
                },
                // Was never set: the inverse is the same no-op.
                None => op.clone(),
            };
            let updated = node.without_property(name);
            Ok((tree.replace_node(*id, updated)?, inverse))
        }
        EditOp::Rename { id, name } => {
            let node = tree.find(*id).ok_or(TreeError::NodeNotFound { id: *id })?;
            let inverse = EditOp::Rename {
                id: *id,
                name: node.name.clone(),
            };
            let mut updated = (**node).clone();
            updated.name = name.clone();
            Ok((tree.replace_node(*id, updated)?, inverse))
        }
        EditOp::InsertChild {
            parent,
            index,
            node,
        } => {
            if tree.contains(node.id) {
                return Err(TreeError::DuplicateNode { id: node.id });
            }
            let parent_path = resolve_path(&tree.root, *parent)
                .ok_or(TreeError::NodeNotFound { id: *parent })?;
            let new_root = insert_child_at(&tree.root, &parent_path, *index, node.clone())?;
            let inverse = EditOp::RemoveNode { id: node.id };
            Ok((LayoutTree::from_root(new_root), inverse))
        }
        EditOp::RemoveNode { id } => {
            let path =
                resolve_path(&tree.root, *id).ok_or(TreeError::NodeNotFound { id: *id })?;
            let Some((parent_path, index)) = path.split_parent() else {
                return Err(TreeError::CannotRemoveRoot);
            };
            let parent_id = node_at(&tree.root, &parent_path)?.id;
            let (new_tree, removed) = tree.remove_at(&path)?;
            let inverse = EditOp::InsertChild {
                parent: parent_id,
                index,
                node: removed,
            };
            Ok((new_tree, inverse))
        }
    }
}

/// A command that captures both a forward edit and its inverse.
#[derive(Debug, Clone)]
struct Command {
    forward: EditOp,
    inverse: EditOp,
    description: String,
}

/// Manages undo/redo stacks for tree edits.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Apply an op to the tree and push it to the undo stack.
    pub fn execute(
        &mut self,
        tree: &mut LayoutTree,
        op: EditOp,
        description: &str,
    ) -> Result<(), TreeError> {
        let (new_tree, inverse) = apply_op(tree, &op)?;
        *tree = new_tree;

        self.undo_stack.push(Command {
            forward: op,
            inverse,
            description: description.to_string(),
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the last edit. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, tree: &mut LayoutTree) -> Result<Option<String>, TreeError> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(None);
        };
        match apply_op(tree, &cmd.inverse) {
            Ok((new_tree, _)) => {
                *tree = new_tree;
                let desc = cmd.description.clone();
                self.redo_stack.push(cmd);
                Ok(Some(desc))
            }
            Err(e) => {
                // Leave the stack as it was; the tree is untouched.
                self.undo_stack.push(cmd);
                Err(e)
            }
        }
    }

    /// Redo the last undone edit. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, tree: &mut LayoutTree) -> Result<Option<String>, TreeError> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(None);
        };
        match apply_op(tree, &cmd.forward) {
            Ok((new_tree, _)) => {
                *tree = new_tree;
                let desc = cmd.description.clone();
                self.undo_stack.push(cmd);
                Ok(Some(desc))
            }
            Err(e) => {
                self.redo_stack.push(cmd);
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
