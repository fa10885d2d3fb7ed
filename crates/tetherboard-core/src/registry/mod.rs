//! Owned collections of shapes and lines, keyed by id in insertion order.

mod lines;
mod shapes;

pub use lines::LineRegistry;
pub use shapes::ShapeRegistry;
