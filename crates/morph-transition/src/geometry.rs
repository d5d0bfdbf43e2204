//! Pure geometry helpers for the reveal choreography.
//!
//! Stateless, side-effect free. All inputs are finite; degenerate bounds are
//! a precondition violation, not a NaN source.

use morph_core::{Point, Rect, Size};

/// Midpoint of a rectangle.
pub fn center_of(rect: Rect) -> Point {
    rect.center()
}

/// Normalize a point into fractional coordinates of a bounding box.
///
/// Used as a scale-transform pivot so scaling appears centered on an
/// arbitrary point instead of the box's geometric center. Points inside the
/// bounds map into [0, 1]×[0, 1]; points outside extrapolate.
///
/// # Panics
/// Panics when the bounds have a non-positive extent.
pub fn anchor_fraction(point: Point, bounds: Rect) -> Point {
    assert!(
        bounds.w > 0.0 && bounds.h > 0.0,
        "anchor bounds must have a positive extent"
    );
    Point::new(
        (point.x - bounds.min_x()) / bounds.w,
        (point.y - bounds.min_y()) / bounds.h,
    )
}

/// A rectangle of the given size centered on the given point.
pub fn frame_centered(center: Point, size: Size) -> Rect {
    Rect::new(
        center.x - size.w / 2.0,
        center.y - size.h / 2.0,
        size.w,
        size.h,
    )
}

/// Euclidean norm of a 2-D vector.
pub fn vector_length(dx: f32, dy: f32) -> f32 {
    dx.hypot(dy)
}
