//! Property Accessor — read and immutably update named properties on one node.
//!
//! Reads are typed: asking for a property under the wrong [`PropertyKind`]
//! returns `None` exactly like a missing property, so callers render their
//! default without a separate error path. Writes never mutate — they return
//! a new [`ViewNode`] whose `children` vector still holds the same `Arc`s.

use crate::model::{Property, ViewNode};
use crate::value::PropertyKind;
use smallvec::SmallVec;

/// The four margin fields, in the order the editor renders them.
pub const MARGIN_PROPERTIES: [&str; 4] = [
    "layout_marginTop",
    "layout_marginEnd",
    "layout_marginBottom",
    "layout_marginStart",
];

/// The four padding fields, in the order the editor renders them.
pub const PADDING_PROPERTIES: [&str; 4] = [
    "paddingTop",
    "paddingEnd",
    "paddingBottom",
    "paddingStart",
];

impl ViewNode {
    /// The property named `name`, if present *and* of the expected kind.
    ///
    /// A type mismatch is indistinguishable from absence here. That is
    /// deliberate: the caller supplies a typed default either way.
    pub fn property(&self, name: &str, kind: PropertyKind) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .filter(|p| p.value.kind() == kind)
    }

    /// True iff a property with that name and kind exists.
    pub fn has_property(&self, name: &str, kind: PropertyKind) -> bool {
        self.property(name, kind).is_some()
    }

    /// A new node with `property` set, replacing any same-named property in
    /// its original position. Children are untouched (same `Arc`s).
    #[must_use]
    pub fn with_property(&self, property: Property) -> ViewNode {
        let mut node = self.clone();
        match node.properties.iter_mut().find(|p| p.name == property.name) {
            Some(slot) => *slot = property,
            None => node.properties.push(property),
        }
        node
    }

    /// A new node with the named property absent. Removing a name that was
    /// never set is a no-op, not an error.
    #[must_use]
    pub fn without_property(&self, name: &str) -> ViewNode {
        let mut node = self.clone();
        node.properties.retain(|p| p.name != name);
        node
    }

    /// Look up a related group of properties (margins, paddings) by name.
    ///
    /// Every requested name appears in the result, in request order, so the
    /// editor can render all fields of the group even when only some are set.
    pub fn grouped_properties<'a>(
        &'a self,
        names: &[&str],
    ) -> SmallVec<[(String, Option<&'a Property>); 4]> {
        names
            .iter()
            .map(|&name| {
                (
                    name.to_string(),
                    self.properties.iter().find(|p| p.name == name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::Widget;
    use crate::value::{Number, PropertyValue, Unit};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn dp(value: f64) -> PropertyValue {
        PropertyValue::Number(Number::new(value, Some(Unit::Dp)))
    }

    fn sample_node() -> ViewNode {
        ViewNode::new(NodeId::intern("card"), Widget::LinearLayout)
            .prop(Property::new("layout_marginTop", dp(8.0)))
            .prop(Property::new("gravity", PropertyValue::Keyword("center".into())))
            .child(ViewNode::new(NodeId::intern("card_text"), Widget::TextView))
    }

    #[test]
    fn typed_get_hits_and_misses() {
        let node = sample_node();
        assert!(node.has_property("layout_marginTop", PropertyKind::Number));
        // Wrong kind reads as absent, not as an error.
        assert_eq!(node.property("layout_marginTop", PropertyKind::Color), None);
        assert_eq!(node.property("nope", PropertyKind::Number), None);
    }

    #[test]
    fn set_replaces_in_place_and_keeps_children() {
        let node = sample_node();
        let updated = node.with_property(Property::new("layout_marginTop", dp(16.0)));

        // Same slot, new value; order preserved.
        assert_eq!(updated.properties[0].name, "layout_marginTop");
        assert_eq!(updated.properties[0].value, dp(16.0));
        assert_eq!(updated.properties.len(), node.properties.len());

        // Children are shared, not copied.
        assert!(Arc::ptr_eq(&node.children[0], &updated.children[0]));
        // The original is untouched.
        assert_eq!(node.properties[0].value, dp(8.0));
    }

    #[test]
    fn set_appends_new_names() {
        let node = sample_node();
        let updated = node.with_property(Property::new("paddingStart", dp(4.0)));
        assert_eq!(updated.properties.len(), 3);
        assert_eq!(updated.properties[2].name, "paddingStart");
    }

    #[test]
    fn remove_is_idempotent() {
        let node = sample_node();
        let once = node.without_property("gravity");
        let twice = once.without_property("gravity");
        assert_eq!(once, twice);
        assert!(!once.has_property("gravity", PropertyKind::Keyword));
    }

    #[test]
    fn grouped_lookup_covers_every_requested_name() {
        let node = sample_node();
        let group = node.grouped_properties(&MARGIN_PROPERTIES);
        assert_eq!(group.len(), 4);
        assert_eq!(group[0].0, "layout_marginTop");
        assert!(group[0].1.is_some());
        // Unset margins still get a slot.
        assert!(group[1].1.is_none());
        assert!(group[2].1.is_none());
        assert!(group[3].1.is_none());
    }
}
