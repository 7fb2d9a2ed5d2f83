//! Source text handling: buffers, positions, ranges, and source maps

pub mod buffer;
pub mod map;
pub mod range;

pub use buffer::SourceBuffer;
pub use map::SourceMap;
pub use range::{Position, SourceRange};
