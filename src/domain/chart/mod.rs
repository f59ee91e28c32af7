//! Chart aggregate: value objects and the line geometry engine.

pub mod geometry;
pub mod value_objects;

pub use geometry::render;
pub use value_objects::*;
