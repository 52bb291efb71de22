//! # gridmark-opc
//!
//! The Open Packaging Conventions layer under both office formats gridmark
//! touches: a ZIP package held in memory, its `.rels` parts, and the path
//! arithmetic between part names.

pub mod error;
pub mod package;
pub mod relationship;

pub use error::{OpcError, OpcResult};
pub use package::{Package, CONTENT_TYPES};
pub use relationship::{
    parse_relationships, part_number, relative_target, rels_path_for, resolve_target,
    Relationship,
};
