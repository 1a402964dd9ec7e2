//! Tree-Menu Projector — the navigable outline of a layout tree.
//!
//! [`project`] maps the layout tree into the generic `{key, label, children}`
//! shape the left-panel menu widget consumes. It is a pure function of the
//! tree; the open/closed flags live in [`OutlineState`], UI-local state that
//! never touches the tree itself. Search is a stateless filter re-derived
//! from the full projection on every keystroke.

use lyt_core::{LayoutTree, NodeId, ViewNode, resolve_path};
use std::collections::HashSet;

/// One entry in the projected menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    /// The underlying node's id.
    pub key: NodeId,
    /// Display name, or the widget tag when the node is unnamed.
    pub label: String,
    pub children: Vec<MenuNode>,
}

/// Project a layout tree into the menu shape.
pub fn project(tree: &LayoutTree) -> MenuNode {
    project_node(&tree.root)
}

fn project_node(node: &ViewNode) -> MenuNode {
    MenuNode {
        key: node.id,
        label: node.label().to_string(),
        children: node.children.iter().map(|c| project_node(c)).collect(),
    }
}

/// The menu state that makes a fresh selection visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialFocus {
    /// Ancestors of the selection — the nodes that must be open.
    pub open: HashSet<NodeId>,
    pub active: Option<NodeId>,
    pub focus: Option<NodeId>,
}

/// Compute which nodes must be open (and which is active/focused) for
/// `first_selected` to be visible. A selection that no longer exists in the
/// tree yields an empty focus rather than an error.
pub fn initial_focus(tree: &LayoutTree, first_selected: NodeId) -> InitialFocus {
    let Some(path) = resolve_path(&tree.root, first_selected) else {
        return InitialFocus::default();
    };

    // Every node along the path except the selection itself.
    let mut open = HashSet::new();
    let mut current = &tree.root;
    for &index in path.indices() {
        open.insert(current.id);
        current = &current.children[index];
    }

    InitialFocus {
        open,
        active: Some(first_selected),
        focus: Some(first_selected),
    }
}

/// Filter a projected menu to entries whose label contains `term`
/// (case-insensitive), keeping the ancestors of every match so it stays
/// reachable. An empty term matches everything.
pub fn filter(menu: &MenuNode, term: &str) -> Option<MenuNode> {
    let needle = term.to_lowercase();
    filter_node(menu, &needle)
}

fn filter_node(node: &MenuNode, needle: &str) -> Option<MenuNode> {
    let children: Vec<MenuNode> = node
        .children
        .iter()
        .filter_map(|c| filter_node(c, needle))
        .collect();

    if !children.is_empty() || node.label.to_lowercase().contains(needle) {
        Some(MenuNode {
            key: node.key,
            label: node.label.clone(),
            children,
        })
    } else {
        None
    }
}

/// UI-local open/closed flags, one per menu node.
///
/// Toggling affects only this state. Selection changes force-open ancestors
/// through [`OutlineState::reveal`] but never force-close a node the curator
/// opened by hand.
#[derive(Debug, Clone, Default)]
pub struct OutlineState {
    open: HashSet<NodeId>,
}

impl OutlineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an [`InitialFocus`].
    pub fn from_focus(focus: &InitialFocus) -> Self {
        Self {
            open: focus.open.clone(),
        }
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.open.contains(&id)
    }

    /// Flip one node's open flag; returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    /// Force-open the ancestors of `selected` so it becomes visible.
    /// Only ever adds to the open set.
    pub fn reveal(&mut self, tree: &LayoutTree, selected: NodeId) {
        self.open.extend(initial_focus(tree, selected).open);
    }
}
