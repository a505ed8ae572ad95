//! Structure tree domain: node types, validation, and materialization.

pub mod materialize;
pub mod node;
pub mod validate;

pub use materialize::materialize_tree;
pub use node::{resolve_root, StructureNode};
pub use validate::{validate_name, validate_tree, NamePolicy, MAX_DEPTH, MAX_NAME_LEN};
