//! # Tech Graph Model
//!
//! Plain data types shared by the store, the deriver, the serializer and the
//! renderer. This module is pure data: no I/O, no state.

pub mod value;
pub mod attribute_map;
pub mod group;
pub mod node;
pub mod edge;

pub use value::Value;
pub use attribute_map::{AttributeMap, attributes, merge_attributes};
pub use group::{Logic, ParentGroup};
pub use node::{Node, NodeInfo};
pub use edge::{Edge, EdgeId, EdgeKey};

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}
