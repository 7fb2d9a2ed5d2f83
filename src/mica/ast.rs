//! The mica syntax tree: node types, dumps, and traversal

pub mod display;
pub mod node;
pub mod walk;

pub use node::{Node, NodeKind};
pub use walk::Preorder;
