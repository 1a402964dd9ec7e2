//! Root-to-node addressing and depth-first id resolution.
//!
//! A [`NodePath`] is the sequence of child indices to follow from the tree
//! root; the empty path is the root itself. Paths are only valid against the
//! exact tree version they were resolved on — walking a stale path is how
//! [`TreeError::PathOutOfRange`] happens.

use crate::error::TreeError;
use crate::id::NodeId;
use crate::model::ViewNode;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A root-to-node address as a sequence of child indices.
///
/// Layout trees are shallow in practice; the segments live inline up to
/// eight levels deep.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(SmallVec<[usize; 8]>);

impl NodePath {
    /// The empty path (the root itself).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Append a child index (mutating).
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Drop the last index.
    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    /// Non-mutating builder: the path to child `index` of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> NodePath {
        let mut path = self.clone();
        path.push(index);
        path
    }

    /// Split into (parent path, index under the parent). `None` at the root.
    pub fn split_parent(&self) -> Option<(NodePath, usize)> {
        let (&last, rest) = self.0.split_last()?;
        Some((NodePath(SmallVec::from_slice(rest)), last))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for index in &self.0 {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

impl FromIterator<usize> for NodePath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve the path from `root` to the node with `target` id.
///
/// Depth-first; ids are unique by invariant, so the first hit is the only
/// one. `None` when the id is not in the tree (deleted elsewhere) — callers
/// fall back to "no selection" rather than failing hard.
pub fn resolve_path(root: &Arc<ViewNode>, target: NodeId) -> Option<NodePath> {
    fn dfs(node: &ViewNode, target: NodeId, acc: &mut NodePath) -> bool {
        if node.id == target {
            return true;
        }
        for (index, child) in node.children.iter().enumerate() {
            acc.push(index);
            if dfs(child, target, acc) {
                return true;
            }
            acc.pop();
        }
        false
    }

    let mut path = NodePath::root();
    dfs(root, target, &mut path).then_some(path)
}

/// Walk `path` down from `root`. Fails with the offending index when the
/// path does not fit the tree.
pub fn node_at<'a>(root: &'a Arc<ViewNode>, path: &NodePath) -> Result<&'a Arc<ViewNode>, TreeError> {
    let mut current = root;
    for &index in path.indices() {
        match current.children.get(index) {
            Some(child) => current = child,
            None => {
                return Err(TreeError::PathOutOfRange {
                    path: path.clone(),
                    index,
                    len: current.children.len(),
                });
            }
        }
    }
    Ok(current)
}
