//! Core data model: widget tags, view nodes, and the layout tree.
//!
//! A [`LayoutTree`] is a rooted, ordered tree of [`ViewNode`]s. Children are
//! held behind `Arc`, so a tree version never mutates in place: every edit
//! produces a new tree value that shares all unmodified subtrees by
//! reference. The mutation operations live in [`crate::mutate`]; this module
//! only knows the shape.

use crate::id::NodeId;
use crate::value::PropertyValue;
use std::fmt;
use std::sync::Arc;

// ─── Widget tags ─────────────────────────────────────────────────────────

/// The widget kind a view node renders as on the exhibition device.
///
/// Tags the engine does not know are carried through [`Widget::Other`] so a
/// document written by a newer renderer survives an edit round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Widget {
    TextView,
    FlowTextView,
    Button,
    ImageView,
    ImageButton,
    MediaView,
    PlayerView,
    LinearLayout,
    FrameLayout,
    RelativeLayout,
    TabLayout,
    WebView,
    Touchable,
    /// Unrecognized tag, preserved verbatim.
    Other(String),
}

impl Widget {
    /// The wire tag for this widget.
    pub fn as_tag(&self) -> &str {
        match self {
            Widget::TextView => "TextView",
            Widget::FlowTextView => "FlowTextView",
            Widget::Button => "Button",
            Widget::ImageView => "ImageView",
            Widget::ImageButton => "ImageButton",
            Widget::MediaView => "MediaView",
            Widget::PlayerView => "PlayerView",
            Widget::LinearLayout => "LinearLayout",
            Widget::FrameLayout => "FrameLayout",
            Widget::RelativeLayout => "RelativeLayout",
            Widget::TabLayout => "TabLayout",
            Widget::WebView => "WebView",
            Widget::Touchable => "Touchable",
            Widget::Other(tag) => tag,
        }
    }

    /// Parse a wire tag; unknown tags become [`Widget::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TextView" => Widget::TextView,
            "FlowTextView" => Widget::FlowTextView,
            "Button" => Widget::Button,
            "ImageView" => Widget::ImageView,
            "ImageButton" => Widget::ImageButton,
            "MediaView" => Widget::MediaView,
            "PlayerView" => Widget::PlayerView,
            "LinearLayout" => Widget::LinearLayout,
            "FrameLayout" => Widget::FrameLayout,
            "RelativeLayout" => Widget::RelativeLayout,
            "TabLayout" => Widget::TabLayout,
            "WebView" => Widget::WebView,
            "Touchable" => Widget::Touchable,
            other => Widget::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ─── Properties ──────────────────────────────────────────────────────────

/// A named, typed attribute on a view node (width, margin, gravity, ...).
/// Names are unique within a node; absence means the renderer's default.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ─── View nodes ──────────────────────────────────────────────────────────

/// One widget/element in a page layout tree.
///
/// `children` order is render order and is preserved by every mutation that
/// does not explicitly reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    /// Unique across the whole tree, stable across edits.
    pub id: NodeId,
    /// What this node renders as.
    pub widget: Widget,
    /// Optional curator-facing display name.
    pub name: Option<String>,
    /// Typed attributes, names unique within this node.
    pub properties: Vec<Property>,
    /// Ordered children, shared across tree versions.
    pub children: Vec<Arc<ViewNode>>,
}

impl ViewNode {
    pub fn new(id: NodeId, widget: Widget) -> Self {
        Self {
            id,
            widget,
            name: None,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the display name (builder).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a property (builder). Assumes the name is not already present.
    #[must_use]
    pub fn prop(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Append a child node (builder).
    #[must_use]
    pub fn child(mut self, node: ViewNode) -> Self {
        self.children.push(Arc::new(node));
        self
    }

    /// Display label: the curator-given name, or the widget tag.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.widget.as_tag())
    }
}

// ─── Layout tree ─────────────────────────────────────────────────────────

/// The full tree of view nodes composing one page layout or sub-layout.
///
/// Cheap to clone: a clone is one `Arc` bump and shares the entire tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    pub root: Arc<ViewNode>,
}

impl LayoutTree {
    pub fn new(root: ViewNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn from_root(root: Arc<ViewNode>) -> Self {
        Self { root }
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: NodeId) -> Option<&Arc<ViewNode>> {
        fn dfs<'a>(node: &'a Arc<ViewNode>, id: NodeId) -> Option<&'a Arc<ViewNode>> {
            if node.id == id {
                return Some(node);
            }
            node.children.iter().find_map(|child| dfs(child, id))
        }
        dfs(&self.root, id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Total node count (root included).
    pub fn node_count(&self) -> usize {
        fn count(node: &ViewNode) -> usize {
            1 + node.children.iter().map(|c| count(c)).sum::<usize>()
        }
        count(&self.root)
    }
}
