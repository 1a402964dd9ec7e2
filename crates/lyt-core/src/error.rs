//! Error types for tree mutation and document decoding.

use crate::id::NodeId;
use crate::path::NodePath;
use thiserror::Error;

/// Errors from the path resolver and tree mutator.
///
/// All of these are fail-fast: the operation that produced them has not
/// touched the caller's tree, so the editor can keep showing the previous,
/// still-consistent version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A path index exceeds the children of the node it addresses.
    /// Typically a stale path held across an intervening mutation.
    #[error("index {index} out of range (len: {len}) walking path {path}")]
    PathOutOfRange {
        /// The full path that was being walked.
        path: NodePath,
        /// The offending index.
        index: usize,
        /// Child count of the node where the walk stopped.
        len: usize,
    },

    /// No node with the given id exists in the tree (e.g. deleted elsewhere).
    #[error("no node with id {id} in the tree")]
    NodeNotFound {
        /// The id that was looked up.
        id: NodeId,
    },

    /// Inserting a node whose id is already taken in this tree would break
    /// id uniqueness and make lookups ambiguous.
    #[error("node {id} already exists in the tree")]
    DuplicateNode {
        /// The id that is already present.
        id: NodeId,
    },

    /// The root node cannot be removed; replace it instead.
    #[error("cannot remove the tree root")]
    CannotRemoveRoot,
}

/// Errors from decoding a stored layout document.
///
/// Unlike [`TreeError`], these indicate structural corruption of the
/// document itself and fail the whole decode.
#[derive(Debug, Error)]
pub enum DocError {
    /// The document is not valid JSON of the expected shape.
    #[error("malformed layout document: {0}")]
    Json(#[from] serde_json::Error),

    /// A property carries a type tag the engine does not know.
    #[error("unknown property type {kind:?} for {name:?} on node {node}")]
    UnknownPropertyKind {
        /// Node the property sits on.
        node: NodeId,
        /// Property name.
        name: String,
        /// The unrecognized type tag.
        kind: String,
    },

    /// A property value literal does not parse under its declared type.
    #[error("bad value for {name:?} on node {node}: {message}")]
    BadValue {
        /// Node the property sits on.
        node: NodeId,
        /// Property name.
        name: String,
        /// What went wrong with the literal.
        message: String,
    },

    /// Two nodes in the document share an id.
    #[error("duplicate node id {id}")]
    DuplicateId {
        /// The repeated id.
        id: NodeId,
    },

    /// A node declares the same property name twice.
    #[error("duplicate property {name:?} on node {node}")]
    DuplicateProperty {
        /// Node carrying the duplicate.
        node: NodeId,
        /// The repeated property name.
        name: String,
    },
}
