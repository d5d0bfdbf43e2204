//! Geometry and scene primitives shared across the morph workspace.
//!
//! These are plain-data types with no rendering backend attached: rectangles
//! and points in logical coordinates, a 2D affine transform, a premultiplied
//! linear color, and a path command list used for mask shapes.

mod color;
mod geometry;
mod path;
mod transform;

pub use color::{Color, ColorLinPremul};
pub use geometry::{Point, Rect, Size};
pub use path::{Path, PathCmd};
pub use transform::Transform2D;
