pub mod commands;
pub mod outline;
pub mod state;
pub mod store;

pub use commands::{CommandStack, EditOp, apply_op};
pub use outline::{InitialFocus, MenuNode, OutlineState, filter, initial_focus, project};
pub use state::EditorState;
pub use store::{LayoutStore, MemoryStore, StoreError};
