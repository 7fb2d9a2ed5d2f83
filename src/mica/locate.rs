//! Source-map visualization: annotation bands under source lines
//!
//! This is the heart of the tool. [`Renderer`] lays one node's named
//! ranges out as tilde underlines with labels, stacking bands when ranges
//! collide and truncating ranges that spill past their starting line. See
//! [`renderer`] for the layout rules.

pub mod colors;
pub mod renderer;
pub mod slot;

pub use colors::Palette;
pub use renderer::{RenderError, Renderer};
pub use slot::AnnotationSlot;
