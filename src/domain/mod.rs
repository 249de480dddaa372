//! Domain layer: outline model, parsing and naming rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod identity;
pub mod outline;
pub mod sanitize;

pub use arena::{NodeData, Outline, OutlineIterator, OutlineNode};
pub use error::{DomainError, DomainResult};
pub use identity::{node_id, NodeId, SHORT_ID_LEN};
pub use outline::{indent_level, OutlineParser, BODY_MARKER};
pub use sanitize::{sanitize, sanitize_name, SanitizePolicy, ELLIPSIS};
