pub mod doc;
pub mod error;
pub mod id;
pub mod model;
pub mod mutate;
pub mod path;
pub mod property;
pub mod value;

pub use doc::{LayoutDocument, decode_document, encode_document};
pub use error::{DocError, TreeError};
pub use id::NodeId;
pub use model::{LayoutTree, Property, ViewNode, Widget};
pub use mutate::{insert_child_at, remove_at_path, replace_at_path};
pub use path::{NodePath, node_at, resolve_path};
pub use property::{MARGIN_PROPERTIES, PADDING_PROPERTIES};
pub use value::{Color, Number, PropertyKind, PropertyValue, Unit};
