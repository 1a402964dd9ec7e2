//! Tree Mutator — immutable single-node updates with structural sharing.
//!
//! Every edit in the editor funnels through [`replace_at_path`]: it rebuilds
//! exactly the root-to-target chain and reuses every sibling `Arc` unchanged.
//! The functions are pure and total over well-formed input; a bad path fails
//! before anything is allocated, so a failed call cannot leave a partially
//! applied tree anywhere.

use crate::error::TreeError;
use crate::id::NodeId;
use crate::model::{LayoutTree, ViewNode};
use crate::path::{NodePath, resolve_path};
use std::sync::Arc;

/// Replace the node at `path` with `replacement`, returning the new root.
///
/// The empty path replaces the root itself. Ancestors along the path are
/// reallocated; every subtree off the path is reference-identical to the
/// input.
pub fn replace_at_path(
    root: &Arc<ViewNode>,
    path: &NodePath,
    replacement: Arc<ViewNode>,
) -> Result<Arc<ViewNode>, TreeError> {
    splice(root, path.indices(), path, replacement)
}

fn splice(
    node: &Arc<ViewNode>,
    segments: &[usize],
    full_path: &NodePath,
    replacement: Arc<ViewNode>,
) -> Result<Arc<ViewNode>, TreeError> {
    let Some((&index, rest)) = segments.split_first() else {
        return Ok(replacement);
    };
    let Some(child) = node.children.get(index) else {
        return Err(TreeError::PathOutOfRange {
            path: full_path.clone(),
            index,
            len: node.children.len(),
        });
    };
    // Recurse first: an out-of-range index deeper down must fail before
    // this level clones anything.
    let new_child = splice(child, rest, full_path, replacement)?;
    Ok(Arc::new(rebuild_with_child(node.as_ref(), index, new_child)))
}

/// Clone `node` with the child at `index` swapped. All sibling `Arc`s are
/// reused.
fn rebuild_with_child(node: &ViewNode, index: usize, child: Arc<ViewNode>) -> ViewNode {
    let mut rebuilt = node.clone();
    rebuilt.children[index] = child;
    rebuilt
}

/// Insert `child` at `index` under the node at `parent_path`.
///
/// `index == len` appends; `index > len` is [`TreeError::PathOutOfRange`].
/// Sibling order around the insertion point is preserved.
pub fn insert_child_at(
    root: &Arc<ViewNode>,
    parent_path: &NodePath,
    index: usize,
    child: Arc<ViewNode>,
) -> Result<Arc<ViewNode>, TreeError> {
    let parent = crate::path::node_at(root, parent_path)?;
    if index > parent.children.len() {
        return Err(TreeError::PathOutOfRange {
            path: parent_path.child(index),
            index,
            len: parent.children.len(),
        });
    }
    let mut new_parent = (**parent).clone();
    new_parent.children.insert(index, child);
    replace_at_path(root, parent_path, Arc::new(new_parent))
}

/// Remove the node at `path`, returning the new root and the removed node.
///
/// The root itself cannot be removed.
pub fn remove_at_path(
    root: &Arc<ViewNode>,
    path: &NodePath,
) -> Result<(Arc<ViewNode>, Arc<ViewNode>), TreeError> {
    let Some((parent_path, index)) = path.split_parent() else {
        return Err(TreeError::CannotRemoveRoot);
    };
    let parent = crate::path::node_at(root, &parent_path)?;
    if index >= parent.children.len() {
        return Err(TreeError::PathOutOfRange {
            path: path.clone(),
            index,
            len: parent.children.len(),
        });
    }
    let mut new_parent = (**parent).clone();
    let removed = new_parent.children.remove(index);
    let new_root = replace_at_path(root, &parent_path, Arc::new(new_parent))?;
    Ok((new_root, removed))
}

impl LayoutTree {
    /// [`replace_at_path`] as a tree-level operation.
    pub fn replace_at(&self, path: &NodePath, replacement: ViewNode) -> Result<LayoutTree, TreeError> {
        replace_at_path(&self.root, path, Arc::new(replacement)).map(LayoutTree::from_root)
    }

    /// Resolve `id` and replace that node. [`TreeError::NodeNotFound`] when
    /// the id is gone from this tree version.
    pub fn replace_node(&self, id: NodeId, replacement: ViewNode) -> Result<LayoutTree, TreeError> {
        let path = resolve_path(&self.root, id).ok_or(TreeError::NodeNotFound { id })?;
        self.replace_at(&path, replacement)
    }

    /// Insert a child under the node at `parent_path`.
    pub fn insert_at(
        &self,
        parent_path: &NodePath,
        index: usize,
        child: ViewNode,
    ) -> Result<LayoutTree, TreeError> {
        insert_child_at(&self.root, parent_path, index, Arc::new(child)).map(LayoutTree::from_root)
    }

    /// Remove the node at `path`; returns the new tree and the removed node.
    pub fn remove_at(&self, path: &NodePath) -> Result<(LayoutTree, Arc<ViewNode>), TreeError> {
        remove_at_path(&self.root, path).map(|(root, removed)| (LayoutTree::from_root(root), removed))
    }
}
