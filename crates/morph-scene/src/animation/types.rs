//! Core motion types: timing models, curves, and animatable values.
//!
//! - `MotionTiming`: duration, start delay, and a tagged curve
//! - `MotionCurve`: instant / cubic-bezier / spring
//! - `AnimatableValue`: closed enum of every value kind the engine animates
//! - `AnimationState`: lifecycle of one attached animation

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

use morph_core::Path;

/// Timing specification for a single property animation.
///
/// Invariant: `duration_ms == 0` means the property jumps to its final value
/// with no animated transition (the engine commits the value and attaches
/// nothing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionTiming {
    /// Duration of the animation in milliseconds. Never negative.
    pub duration_ms: f32,
    /// Delay before the animation starts in milliseconds. Never negative.
    pub delay_ms: f32,
    /// Curve controlling the rate of change over time.
    pub curve: MotionCurve,
}

impl MotionTiming {
    /// A timing that commits the final value with no animation.
    pub fn instant() -> Self {
        Self {
            duration_ms: 0.0,
            delay_ms: 0.0,
            curve: MotionCurve::Instant,
        }
    }

    /// A bezier-curved timing.
    ///
    /// # Panics
    /// Panics if the duration is negative or x control points are outside [0, 1].
    pub fn bezier(duration_ms: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(duration_ms >= 0.0, "Duration must be non-negative");
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self {
            duration_ms,
            delay_ms: 0.0,
            curve: MotionCurve::Bezier { x1, y1, x2, y2 },
        }
    }

    /// A spring-driven timing. The duration is the spring's own computed
    /// settling time; callers never supply one.
    ///
    /// # Panics
    /// Panics if mass, stiffness, or damping is not strictly positive.
    pub fn spring(mass: f32, stiffness: f32, damping: f32) -> Self {
        let curve = crate::animation::spring::SpringCurve::new(mass, stiffness, damping);
        Self {
            duration_ms: curve.settling_duration_ms(crate::animation::spring::REST_THRESHOLD),
            delay_ms: 0.0,
            curve: MotionCurve::Spring {
                mass,
                stiffness,
                damping,
            },
        }
    }

    /// Set the delay before the animation starts.
    ///
    /// # Panics
    /// Panics if the delay is negative.
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        assert!(delay_ms >= 0.0, "Delay must be non-negative");
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for MotionTiming {
    fn default() -> Self {
        // CSS `ease` control points, 300ms.
        Self::bezier(300.0, 0.25, 0.1, 0.25, 1.0)
    }
}

/// Curve for a motion timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionCurve {
    /// No animation object; the value is committed directly.
    Instant,
    /// Cubic bezier with two control points (x values in [0, 1]).
    Bezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Physically-modeled spring; duration is the spring's settling time.
    Spring {
        mass: f32,
        stiffness: f32,
        damping: f32,
    },
}

/// Current state of an attached animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Created but waiting for its start delay.
    Pending,
    /// Actively interpolating.
    Running,
    /// Completed; its presentation override has been cleared.
    Finished,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Pending
    }
}

/// Discriminant for [`AnimatableValue`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Point,
    Size,
    Color,
    Path,
}

/// Enum representing all animatable value types.
///
/// A closed tagged union: the engine matches exhaustively on variant pairs
/// for coercion and additive math instead of dispatching on dynamic types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimatableValue {
    /// Numeric value (opacity, position component, scale factor, ...).
    Scalar { value: f32 },
    /// 2-D point.
    Point { x: f32, y: f32 },
    /// 2-D size.
    Size { w: f32, h: f32 },
    /// RGBA color components in premultiplied linear space.
    Color { rgba: [f32; 4] },
    /// Path geometry (mask shapes).
    Path { path: Path },
}

impl AnimatableValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar { .. } => ValueKind::Scalar,
            Self::Point { .. } => ValueKind::Point,
            Self::Size { .. } => ValueKind::Size,
            Self::Color { .. } => ValueKind::Color,
            Self::Path { .. } => ValueKind::Path,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<(f32, f32)> {
        match self {
            Self::Point { x, y } => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<(f32, f32)> {
        match self {
            Self::Size { w, h } => Some((*w, *h)),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color { rgba } => Some(*rgba),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path { path } => Some(path),
            _ => None,
        }
    }
}

impl From<f32> for AnimatableValue {
    fn from(v: f32) -> Self {
        Self::Scalar { value: v }
    }
}

impl From<[f32; 4]> for AnimatableValue {
    fn from(rgba: [f32; 4]) -> Self {
        Self::Color { rgba }
    }
}

impl From<Path> for AnimatableValue {
    fn from(path: Path) -> Self {
        Self::Path { path }
    }
}

impl From<morph_core::Point> for AnimatableValue {
    fn from(p: morph_core::Point) -> Self {
        Self::Point { x: p.x, y: p.y }
    }
}

impl From<morph_core::Size> for AnimatableValue {
    fn from(s: morph_core::Size) -> Self {
        Self::Size { w: s.w, h: s.h }
    }
}

impl From<morph_core::Color> for AnimatableValue {
    fn from(c: morph_core::Color) -> Self {
        Self::Color {
            rgba: c.components(),
        }
    }
}

assert_impl_all!(AnimatableValue: Send, Sync);
assert_impl_all!(MotionTiming: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::{Point, Rect};

    #[test]
    fn test_value_kinds() {
        let v: AnimatableValue = 1.0.into();
        assert_eq!(v.kind(), ValueKind::Scalar);
        assert_eq!(v.as_scalar(), Some(1.0));
        assert_eq!(v.as_color(), None);

        let v: AnimatableValue = [0.0, 0.5, 1.0, 1.0].into();
        assert_eq!(v.kind(), ValueKind::Color);
        assert_eq!(v.as_color(), Some([0.0, 0.5, 1.0, 1.0]));

        let v: AnimatableValue = Path::rect(Rect::new(0.0, 0.0, 1.0, 1.0)).into();
        assert_eq!(v.kind(), ValueKind::Path);
        assert!(v.as_path().is_some());

        let v: AnimatableValue = Point::new(2.0, 3.0).into();
        assert_eq!(v.as_point(), Some((2.0, 3.0)));
    }

    #[test]
    fn test_timing_builders() {
        let t = MotionTiming::bezier(250.0, 0.4, 0.0, 0.2, 1.0).with_delay(50.0);
        assert_eq!(t.duration_ms, 250.0);
        assert_eq!(t.delay_ms, 50.0);
        assert!(matches!(t.curve, MotionCurve::Bezier { .. }));

        let t = MotionTiming::instant();
        assert_eq!(t.duration_ms, 0.0);
        assert_eq!(t.curve, MotionCurve::Instant);

        let t = MotionTiming::spring(1.0, 180.0, 22.0);
        assert!(matches!(t.curve, MotionCurve::Spring { .. }));
    }

    #[test]
    #[should_panic(expected = "Bezier x values must be in [0, 1]")]
    fn test_invalid_bezier_x() {
        MotionTiming::bezier(100.0, -0.1, 0.0, 0.5, 1.0);
    }

    #[test]
    #[should_panic(expected = "Spring parameters must be strictly positive")]
    fn test_invalid_spring() {
        MotionTiming::spring(0.0, 180.0, 22.0);
    }

    #[test]
    #[should_panic(expected = "Delay must be non-negative")]
    fn test_invalid_delay() {
        MotionTiming::instant().with_delay(-1.0);
    }
}
