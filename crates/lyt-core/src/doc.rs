//! Store-document codec: the JSON wire shape ↔ the typed model.
//!
//! The store round-trips whole documents, never patches. On the wire a
//! property is a `{name, type, value}` triple with the value as a text
//! literal; decoding parses the literal under its declared type and checks
//! the structural invariants (node ids unique document-wide, property names
//! unique per node). Violations fail the whole decode — a half-trusted tree
//! is worse than none.

use crate::error::DocError;
use crate::id::NodeId;
use crate::model::{LayoutTree, Property, ViewNode, Widget};
use crate::value::{PropertyKind, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ─── Wire shape ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProperty {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: String,
    widget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    properties: Vec<RawProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDocument {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    revision: u64,
    root: RawNode,
}

// ─── Typed document ──────────────────────────────────────────────────────

/// A decoded layout document: store metadata plus the typed tree.
///
/// `revision` is the store revision this document was loaded at; saves are
/// checked against it (see the editor's store boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    /// Store id of the layout (not a tree node id).
    pub id: String,
    /// Curator-facing layout name.
    pub name: String,
    /// Store revision at load time.
    pub revision: u64,
    pub tree: LayoutTree,
}

/// Decode a stored layout document from JSON.
pub fn decode_document(json: &str) -> Result<LayoutDocument, DocError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    let root = decode_node(&raw.root, &mut seen)?;
    log::debug!(
        "decoded layout {:?} rev {} ({} nodes)",
        raw.id,
        raw.revision,
        seen.len()
    );
    Ok(LayoutDocument {
        id: raw.id,
        name: raw.name,
        revision: raw.revision,
        tree: LayoutTree::new(root),
    })
}

/// Encode a layout document back to the store's JSON shape.
///
/// Fails with [`DocError::BadValue`] on a non-finite number property — such
/// a value has no literal the decoder would accept, so writing it would
/// produce a document that can never be reloaded.
pub fn encode_document(doc: &LayoutDocument) -> Result<String, DocError> {
    let raw = RawDocument {
        id: doc.id.clone(),
        name: doc.name.clone(),
        revision: doc.revision,
        root: encode_node(&doc.tree.root)?,
    };
    Ok(serde_json::to_string_pretty(&raw)?)
}

fn decode_node(raw: &RawNode, seen: &mut HashSet<NodeId>) -> Result<ViewNode, DocError> {
    let id = NodeId::intern(&raw.id);
    if !seen.insert(id) {
        return Err(DocError::DuplicateId { id });
    }

    let widget = Widget::from_tag(&raw.widget);
    if matches!(widget, Widget::Other(_)) {
        log::warn!("unknown widget tag {:?} on node {id}; passing through", raw.widget);
    }

    let mut properties = Vec::with_capacity(raw.properties.len());
    let mut names = HashSet::new();
    for prop in &raw.properties {
        if !names.insert(prop.name.as_str()) {
            return Err(DocError::DuplicateProperty {
                node: id,
                name: prop.name.clone(),
            });
        }
        let kind = PropertyKind::from_tag(&prop.kind).ok_or_else(|| {
            DocError::UnknownPropertyKind {
                node: id,
                name: prop.name.clone(),
                kind: prop.kind.clone(),
            }
        })?;
        let value = PropertyValue::parse(kind, &prop.value).map_err(|message| {
            DocError::BadValue {
                node: id,
                name: prop.name.clone(),
                message,
            }
        })?;
        properties.push(Property::new(&prop.name, value));
    }

    let mut children = Vec::with_capacity(raw.children.len());
    for child in &raw.children {
        children.push(Arc::new(decode_node(child, seen)?));
    }

    Ok(ViewNode {
        id,
        widget,
        name: raw.name.clone(),
        properties,
        children,
    })
}

fn encode_node(node: &ViewNode) -> Result<RawNode, DocError> {
    let mut properties = Vec::with_capacity(node.properties.len());
    for p in &node.properties {
        if let PropertyValue::Number(n) = &p.value
            && !n.value.is_finite()
        {
            return Err(DocError::BadValue {
                node: node.id,
                name: p.name.clone(),
                message: format!("non-finite number {}", n.value),
            });
        }
        properties.push(RawProperty {
            name: p.name.clone(),
            kind: p.value.kind().as_str().to_string(),
            value: p.value.to_string(),
        });
    }

    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        children.push(encode_node(child)?);
    }

    Ok(RawNode {
        id: node.id.as_str().to_string(),
        widget: node.widget.as_tag().to_string(),
        name: node.name.clone(),
        properties,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Unit};
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r##"{
        "id": "layout-1",
        "name": "Lobby screen",
        "revision": 3,
        "root": {
            "id": "root",
            "widget": "LinearLayout",
            "properties": [
                { "name": "layout_width", "type": "keyword", "value": "match_parent" },
                { "name": "paddingTop", "type": "number", "value": "16dp" },
                { "name": "background", "type": "color", "value": "#1A1A2E" }
            ],
            "children": [
                { "id": "title", "widget": "TextView",
                  "properties": [ { "name": "text", "type": "string", "value": "Welcome" } ] }
            ]
        }
    }"##;

    #[test]
    fn decodes_typed_values() {
        let doc = decode_document(MINIMAL).unwrap();
        assert_eq!(doc.name, "Lobby screen");
        assert_eq!(doc.revision, 3);

        let root = &doc.tree.root;
        assert_eq!(root.widget, Widget::LinearLayout);
        assert_eq!(
            root.property("paddingTop", PropertyKind::Number).unwrap().value,
            PropertyValue::Number(Number::new(16.0, Some(Unit::Dp)))
        );
        assert_eq!(
            root.property("background", PropertyKind::Color)
                .unwrap()
                .value
                .to_string(),
            "#1A1A2E"
        );
    }

    #[test]
    fn encode_decode_roundtrips() {
        let doc = decode_document(MINIMAL).unwrap();
        let json = encode_document(&doc).unwrap();
        let again = decode_document(&json).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn duplicate_node_ids_fail_the_decode() {
        let json = r#"{
            "id": "layout-2", "root": {
                "id": "root", "widget": "FrameLayout",
                "children": [
                    { "id": "twin", "widget": "TextView" },
                    { "id": "twin", "widget": "TextView" }
                ]
            }
        }"#;
        let err = decode_document(json).unwrap_err();
        assert!(matches!(err, DocError::DuplicateId { id } if id == NodeId::intern("twin")));
    }

    #[test]
    fn duplicate_property_names_fail_the_decode() {
        let json = r#"{
            "id": "layout-3", "root": {
                "id": "root", "widget": "TextView",
                "properties": [
                    { "name": "text", "type": "string", "value": "a" },
                    { "name": "text", "type": "string", "value": "b" }
                ]
            }
        }"#;
        assert!(matches!(
            decode_document(json).unwrap_err(),
            DocError::DuplicateProperty { .. }
        ));
    }

    #[test]
    fn bad_value_literal_names_the_property() {
        let json = r#"{
            "id": "layout-4", "root": {
                "id": "root", "widget": "TextView",
                "properties": [ { "name": "textSize", "type": "number", "value": "large" } ]
            }
        }"#;
        let err = decode_document(json).unwrap_err();
        match err {
            DocError::BadValue { name, .. } => assert_eq!(name, "textSize"),
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_number_fails_the_encode() {
        let mut doc = decode_document(MINIMAL).unwrap();
        let root = (*doc.tree.root).clone().prop(Property::new(
            "layout_weight",
            PropertyValue::Number(Number::plain(f64::NAN)),
        ));
        doc.tree = LayoutTree::new(root);

        let err = encode_document(&doc).unwrap_err();
        match err {
            DocError::BadValue { name, .. } => assert_eq!(name, "layout_weight"),
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn unknown_widget_tag_passes_through_the_roundtrip() {
        let json = r#"{
            "id": "layout-5", "root": { "id": "root", "widget": "HoloProjector" }
        }"#;
        let doc = decode_document(json).unwrap();
        assert_eq!(
            doc.tree.root.widget,
            Widget::Other("HoloProjector".to_string())
        );
        let encoded = encode_document(&doc).unwrap();
        assert!(encoded.contains("HoloProjector"));
    }

    #[test]
    fn unknown_property_kind_is_an_error() {
        let json = r#"{
            "id": "layout-6", "root": {
                "id": "root", "widget": "TextView",
                "properties": [ { "name": "blur", "type": "float", "value": "1.0" } ]
            }
        }"#;
        assert!(matches!(
            decode_document(json).unwrap_err(),
            DocError::UnknownPropertyKind { .. }
        ));
    }
}
