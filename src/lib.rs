//! # mica-parse
//!
//! Parse runner and AST source-map visualizer for the mica language.
//!
//! The crate parses mica programs into located syntax trees and renders
//! each node's source ranges as annotation bands under the relevant
//! source lines, in the style of compiler diagnostics:
//!
//! ```text
//! foo = bar + 1
//!     ~ operator
//! ~~~~~~~~~~~~~ expression
//! ```
//!
//! Entry points:
//!
//! - [`mica::source::SourceBuffer`] - named source text with position math
//! - [`mica::parsing::Parser`] - tokens to located [`mica::ast::Node`] trees
//! - [`mica::locate::Renderer`] - the per-node annotation band layout
//! - [`mica::runner::Runner`] - the batch driver behind the `mica-parse` binary

pub mod mica;

pub use mica::ast::{Node, NodeKind};
pub use mica::locate::Renderer;
pub use mica::parsing::Parser;
pub use mica::source::SourceBuffer;
