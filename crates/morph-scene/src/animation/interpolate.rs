//! Interpolation and additive-delta math for animatable values.
//!
//! Two families of operations live here:
//! - `Interpolate`: blend between two values at a progress factor
//! - `delta` / `offset`: the additive optimization — an animation is stored
//!   as a difference converging on zero, applied on top of the model value,
//!   so concurrent animations on the same property compose instead of
//!   overwriting one another

use morph_core::{Path, PathCmd, Point, Size};

use super::types::AnimatableValue;

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self; when t = 1.0, returns `to`. Values
    /// outside [0, 1] extrapolate (spring overshoot relies on this).
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for Point {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Point::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

impl Interpolate for Size {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Size::new(lerp(self.w, to.w, t), lerp(self.h, to.h, t))
    }
}

impl Interpolate for [f32; 4] {
    /// Per-component blend; colors are premultiplied linear so this is
    /// perceptually smooth.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        [
            lerp(self[0], to[0], t),
            lerp(self[1], to[1], t),
            lerp(self[2], to[2], t),
            lerp(self[3], to[3], t),
        ]
    }
}

impl Interpolate for Path {
    /// Pointwise blend when the command lists are congruent; otherwise a
    /// step function that switches to `to` at the end.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        if !self.is_congruent_to(to) {
            return if t < 1.0 { self.clone() } else { to.clone() };
        }

        let cmds = self
            .cmds
            .iter()
            .zip(to.cmds.iter())
            .map(|(a, b)| match (a, b) {
                (PathCmd::MoveTo(p), PathCmd::MoveTo(q)) => PathCmd::MoveTo(lerp2(*p, *q, t)),
                (PathCmd::LineTo(p), PathCmd::LineTo(q)) => PathCmd::LineTo(lerp2(*p, *q, t)),
                (PathCmd::QuadTo(p1, p2), PathCmd::QuadTo(q1, q2)) => {
                    PathCmd::QuadTo(lerp2(*p1, *q1, t), lerp2(*p2, *q2, t))
                }
                (PathCmd::CubicTo(p1, p2, p3), PathCmd::CubicTo(q1, q2, q3)) => {
                    PathCmd::CubicTo(lerp2(*p1, *q1, t), lerp2(*p2, *q2, t), lerp2(*p3, *q3, t))
                }
                (PathCmd::Close, PathCmd::Close) => PathCmd::Close,
                // Congruence was checked above.
                _ => unreachable!("congruent paths diverged"),
            })
            .collect();

        Path::new(cmds)
    }
}

#[inline]
fn lerp2(from: [f32; 2], to: [f32; 2], t: f32) -> [f32; 2] {
    [lerp(from[0], to[0], t), lerp(from[1], to[1], t)]
}

impl Interpolate for AnimatableValue {
    /// Interpolate between two values of the same variant.
    ///
    /// Mismatched variants return self unchanged; the engine's endpoint
    /// precondition keeps that branch unreachable in practice.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Self::Scalar { value: a }, Self::Scalar { value: b }) => Self::Scalar {
                value: a.interpolate(b, t),
            },
            (Self::Point { x: ax, y: ay }, Self::Point { x: bx, y: by }) => {
                let p = Point::new(*ax, *ay).interpolate(&Point::new(*bx, *by), t);
                Self::Point { x: p.x, y: p.y }
            }
            (Self::Size { w: aw, h: ah }, Self::Size { w: bw, h: bh }) => {
                let s = Size::new(*aw, *ah).interpolate(&Size::new(*bw, *bh), t);
                Self::Size { w: s.w, h: s.h }
            }
            (Self::Color { rgba: a }, Self::Color { rgba: b }) => Self::Color {
                rgba: a.interpolate(b, t),
            },
            (Self::Path { path: a }, Self::Path { path: b }) => Self::Path {
                path: a.interpolate(b, t),
            },
            _ => self.clone(),
        }
    }
}

/// The zero delta of the same variant as `v` — the value an additive
/// animation converges on.
///
/// # Panics
/// Panics on Path values, which have no additive form.
pub fn zero_like(v: &AnimatableValue) -> AnimatableValue {
    match v {
        AnimatableValue::Scalar { .. } => AnimatableValue::Scalar { value: 0.0 },
        AnimatableValue::Point { .. } => AnimatableValue::Point { x: 0.0, y: 0.0 },
        AnimatableValue::Size { .. } => AnimatableValue::Size { w: 0.0, h: 0.0 },
        AnimatableValue::Color { .. } => AnimatableValue::Color {
            rgba: [0.0, 0.0, 0.0, 0.0],
        },
        AnimatableValue::Path { .. } => panic!("no additive form for path values"),
    }
}

/// Componentwise difference `a - b`, the additive animation's starting delta.
///
/// # Panics
/// Panics on mismatched variants or on Path values — path geometry has no
/// additive form, which is a programmer error at the call site.
pub fn delta(a: &AnimatableValue, b: &AnimatableValue) -> AnimatableValue {
    match (a, b) {
        (AnimatableValue::Scalar { value: a }, AnimatableValue::Scalar { value: b }) => {
            AnimatableValue::Scalar { value: a - b }
        }
        (
            AnimatableValue::Point { x: ax, y: ay },
            AnimatableValue::Point { x: bx, y: by },
        ) => AnimatableValue::Point {
            x: ax - bx,
            y: ay - by,
        },
        (
            AnimatableValue::Size { w: aw, h: ah },
            AnimatableValue::Size { w: bw, h: bh },
        ) => AnimatableValue::Size {
            w: aw - bw,
            h: ah - bh,
        },
        (AnimatableValue::Color { rgba: a }, AnimatableValue::Color { rgba: b }) => {
            AnimatableValue::Color {
                rgba: [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]],
            }
        }
        _ => panic!(
            "no additive form for value pair {:?} / {:?}",
            a.kind(),
            b.kind()
        ),
    }
}

/// Componentwise sum `model + delta`, composing an additive contribution on
/// top of the committed model value.
///
/// # Panics
/// Panics on mismatched variants or Path values, as [`delta`] does.
pub fn offset(model: &AnimatableValue, delta: &AnimatableValue) -> AnimatableValue {
    match (model, delta) {
        (AnimatableValue::Scalar { value: m }, AnimatableValue::Scalar { value: d }) => {
            AnimatableValue::Scalar { value: m + d }
        }
        (
            AnimatableValue::Point { x: mx, y: my },
            AnimatableValue::Point { x: dx, y: dy },
        ) => AnimatableValue::Point {
            x: mx + dx,
            y: my + dy,
        },
        (
            AnimatableValue::Size { w: mw, h: mh },
            AnimatableValue::Size { w: dw, h: dh },
        ) => AnimatableValue::Size {
            w: mw + dw,
            h: mh + dh,
        },
        (AnimatableValue::Color { rgba: m }, AnimatableValue::Color { rgba: d }) => {
            AnimatableValue::Color {
                rgba: [m[0] + d[0], m[1] + d[1], m[2] + d[2], m[3] + d[3]],
            }
        }
        _ => panic!(
            "no additive form for value pair {:?} / {:?}",
            model.kind(),
            delta.kind()
        ),
    }
}
