//! The interpolation engine.
//!
//! `Animator::animate` turns a timing model, a target property, and an
//! ordered endpoint pair into an attached property animation inside a
//! transaction, handling:
//! - reversal (one phase spec drives both transition directions)
//! - the additive-delta optimization (sampled-start minus destination,
//!   converging on zero on top of the model value)
//! - value-kind coercion and preconditions
//! - zero-duration / instant / equal-endpoint elision
//! - the injected slow-motion time scale, applied uniformly to duration
//!   and delay
//!
//! Regardless of whether an animation attaches, the destination value is
//! committed onto the target's model, so the final rendered state is correct
//! even when animations are skipped.

use crate::animation::spring::{SpringCurve, REST_THRESHOLD};
use crate::animation::transaction::{
    ActiveAnimation, AnimationPayload, ResolvedCurve, Transaction,
};
use crate::animation::types::{AnimatableValue, AnimationState, MotionCurve, MotionTiming, ValueKind};
use crate::animation::interpolate::delta;
use crate::layer::{LayerId, LayerProperty, LayerTree};
use crate::LayerCallback;

/// Per-call engine options.
///
/// These are parameters, not engine state: the same animator instance serves
/// every call, and nothing about one call leaks into the next.
#[derive(Default)]
pub struct AnimateOptions {
    /// Swap the endpoint order before use (backward / dismissal runs).
    pub reversed: bool,
    /// Start from the currently rendered value of the property instead of
    /// the literal first endpoint, falling back to the model value when no
    /// animation is in flight.
    pub from_presentation: bool,
    /// Invoked once this animation finishes. Runs on the first tick when
    /// the submission is elided.
    pub completion: Option<LayerCallback>,
}

impl AnimateOptions {
    pub fn reversed(reversed: bool) -> Self {
        Self {
            reversed,
            ..Self::default()
        }
    }
}

/// The motion interpolation engine.
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    time_scale: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self { time_scale: 1.0 }
    }

    /// An animator with a slow-motion multiplier, normally taken from
    /// configuration once at process start. 1.0 in production.
    ///
    /// # Panics
    /// Panics if the scale is not strictly positive.
    pub fn with_time_scale(time_scale: f32) -> Self {
        assert!(time_scale > 0.0, "Time scale must be strictly positive");
        Self { time_scale }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Submit one property animation to the batch.
    ///
    /// # Panics
    /// Panics when the endpoint values differ in kind, or when their kind
    /// does not match the property — both are programmer errors.
    pub fn animate(
        &self,
        tree: &mut LayerTree,
        txn: &mut Transaction,
        target: LayerId,
        property: LayerProperty,
        timing: &MotionTiming,
        endpoints: [AnimatableValue; 2],
        options: AnimateOptions,
    ) {
        let [a, b] = endpoints;
        let (from, to) = if options.reversed { (b, a) } else { (a, b) };

        assert_eq!(
            from.kind(),
            to.kind(),
            "animation endpoints must share a value kind"
        );
        assert_eq!(
            from.kind(),
            property.expected_kind(),
            "endpoint kind does not match property {:?}",
            property
        );

        // Sample before committing: committing would clobber the live value.
        let initial = if options.from_presentation {
            tree.presentation_value(target, property)
        } else {
            from
        };

        tree.set_model_value(target, property, to.clone());

        let skip = initial == to
            || matches!(timing.curve, MotionCurve::Instant)
            || timing.duration_ms == 0.0;
        if skip {
            tracing::trace!(
                layer = target.0,
                property = ?property,
                "elided animation, committed final value"
            );
            if let Some(completion) = options.completion {
                txn.defer(completion);
            }
            return;
        }

        let (curve, duration_ms) = match timing.curve {
            MotionCurve::Instant => unreachable!("instant curves are elided above"),
            MotionCurve::Bezier { x1, y1, x2, y2 } => (
                ResolvedCurve::Bezier { x1, y1, x2, y2 },
                timing.duration_ms * self.time_scale,
            ),
            MotionCurve::Spring {
                mass,
                stiffness,
                damping,
            } => {
                let spring = SpringCurve::new(mass, stiffness, damping);
                let settle_ms = spring.settling_duration_ms(REST_THRESHOLD);
                (
                    ResolvedCurve::Spring {
                        curve: spring,
                        settle_secs: settle_ms / 1000.0,
                    },
                    settle_ms * self.time_scale,
                )
            }
        };
        let delay_ms = timing.delay_ms * self.time_scale;

        let payload = match initial.kind() {
            // Path geometry has no additive form; animate it absolutely.
            ValueKind::Path => AnimationPayload::Absolute { from: initial, to },
            _ => AnimationPayload::Additive {
                delta: delta(&initial, &to),
            },
        };

        txn.attach(ActiveAnimation {
            layer: target,
            property,
            duration_ms,
            delay_ms,
            curve,
            payload,
            elapsed_ms: 0.0,
            state: if delay_ms > 0.0 {
                AnimationState::Pending
            } else {
                AnimationState::Running
            },
            completion: options.completion,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use morph_core::Rect;

    fn linear(duration_ms: f32) -> MotionTiming {
        MotionTiming::bezier(duration_ms, 0.0, 0.0, 1.0, 1.0)
    }

    fn tree_with_node() -> (LayerTree, LayerId) {
        let mut tree = LayerTree::new();
        let id = tree.add_layer(Layer::new("node").with_frame(Rect::new(0.0, 0.0, 10.0, 10.0)));
        (tree, id)
    }

    #[test]
    fn test_equal_endpoints_elided_but_committed() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        let animator = Animator::new();

        animator.animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &linear(300.0),
            [0.5.into(), 0.5.into()],
            AnimateOptions::default(),
        );

        assert_eq!(txn.animation_count(), 0);
        assert_eq!(tree.layer(id).opacity, 0.5);
    }

    #[test]
    fn test_zero_duration_elided_but_committed() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        let animator = Animator::new();

        animator.animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &linear(0.0),
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );

        assert_eq!(txn.animation_count(), 0);
        assert_eq!(tree.layer(id).opacity, 1.0);
    }

    #[test]
    fn test_zero_duration_spring_elided_but_committed() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        // A hand-built timing, bypassing the spring constructor's computed
        // settling duration.
        let timing = MotionTiming {
            duration_ms: 0.0,
            delay_ms: 0.0,
            curve: MotionCurve::Spring {
                mass: 1.0,
                stiffness: 180.0,
                damping: 22.0,
            },
        };

        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &timing,
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );

        assert_eq!(txn.animation_count(), 0);
        assert_eq!(tree.layer(id).opacity, 1.0);
    }

    #[test]
    fn test_path_endpoints_animate_absolutely() {
        use morph_core::{Path, Point};

        let (mut tree, id) = tree_with_node();
        let small = Path::circle(Point::new(0.0, 0.0), 10.0);
        let large = Path::circle(Point::new(0.0, 0.0), 20.0);

        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::MaskPath,
            &linear(100.0),
            [small.into(), large.clone().into()],
            AnimateOptions::default(),
        );

        assert_eq!(txn.animation_count(), 1);
        assert_eq!(tree.layer(id).mask, Some(large));

        // Congruent circles blend pointwise; radius is 15 at the midpoint.
        txn.tick(50.0, &mut tree);
        let mid = tree.presentation_value(id, LayerProperty::MaskPath);
        let first = mid.as_path().unwrap().cmds[0];
        assert!(matches!(first, morph_core::PathCmd::MoveTo([x, _]) if (x - 15.0).abs() < 0.01));
    }

    #[test]
    fn test_instant_curve_elided_but_committed() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &MotionTiming::instant(),
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );
        assert_eq!(txn.animation_count(), 0);
        assert_eq!(tree.layer(id).opacity, 1.0);
    }

    #[test]
    fn test_additive_delta_from_sampled_value() {
        let (mut tree, id) = tree_with_node();
        tree.set_model_value(id, LayerProperty::PositionX, 10.0.into());
        // A prior animation left the rendered value at 10; destination is 4.
        tree.set_presentation_value(id, LayerProperty::PositionX, 10.0.into());

        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::PositionX,
            &linear(100.0),
            [0.0.into(), 4.0.into()],
            AnimateOptions {
                from_presentation: true,
                ..Default::default()
            },
        );

        // Model committed to the destination.
        assert_eq!(
            tree.model_value(id, LayerProperty::PositionX).as_scalar(),
            Some(4.0)
        );

        // The delta runs 6 → 0: at the start the rendered value is still 10.
        txn.tick(0.0, &mut tree);
        assert_eq!(
            tree.presentation_value(id, LayerProperty::PositionX).as_scalar(),
            Some(10.0)
        );
        txn.tick(50.0, &mut tree);
        let mid = tree
            .presentation_value(id, LayerProperty::PositionX)
            .as_scalar()
            .unwrap();
        assert!((mid - 7.0).abs() < 0.01, "got {}", mid);
        txn.tick(60.0, &mut tree);
        assert_eq!(
            tree.presentation_value(id, LayerProperty::PositionX).as_scalar(),
            Some(4.0)
        );
    }

    #[test]
    fn test_reversal_swaps_endpoints() {
        let run = |endpoints: [AnimatableValue; 2], reversed: bool| -> Vec<f32> {
            let (mut tree, id) = tree_with_node();
            let mut txn = Transaction::new();
            Animator::new().animate(
                &mut tree,
                &mut txn,
                id,
                LayerProperty::Opacity,
                &linear(100.0),
                endpoints,
                AnimateOptions::reversed(reversed),
            );
            let mut samples = Vec::new();
            for _ in 0..5 {
                txn.tick(25.0, &mut tree);
                samples.push(
                    tree.presentation_value(id, LayerProperty::Opacity)
                        .as_scalar()
                        .unwrap(),
                );
            }
            samples
        };

        let forward_swapped = run([1.0.into(), 0.0.into()], false);
        let reversed = run([0.0.into(), 1.0.into()], true);
        assert_eq!(forward_swapped, reversed);
    }

    #[test]
    fn test_time_scale_applies_to_duration_and_delay() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        Animator::with_time_scale(2.0).animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &linear(100.0).with_delay(50.0),
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );

        let animation = &txn.animations[0];
        assert_eq!(animation.duration_ms, 200.0);
        assert_eq!(animation.delay_ms, 100.0);
    }

    #[test]
    fn test_spring_duration_is_settling_time() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &MotionTiming::spring(1.0, 180.0, 22.0),
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );

        let expected = SpringCurve::new(1.0, 180.0, 22.0).settling_duration_ms(REST_THRESHOLD);
        let animation = &txn.animations[0];
        assert!((animation.duration_ms - expected).abs() < 0.01);
    }

    #[test]
    fn test_deferred_completion_on_elided_animation() {
        use std::cell::Cell;
        use std::rc::Rc;

        let (mut tree, id) = tree_with_node();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &linear(0.0),
            [0.0.into(), 1.0.into()],
            AnimateOptions {
                completion: Some(Box::new(move |_| fired_clone.set(true))),
                ..Default::default()
            },
        );

        assert_eq!(txn.animation_count(), 0);
        txn.tick(1.0, &mut tree);
        assert!(fired.get());
    }

    #[test]
    #[should_panic(expected = "animation endpoints must share a value kind")]
    fn test_mismatched_endpoints_panic() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::Opacity,
            &linear(100.0),
            [0.0.into(), [0.0, 0.0, 0.0, 1.0].into()],
            AnimateOptions::default(),
        );
    }

    #[test]
    #[should_panic(expected = "endpoint kind does not match property")]
    fn test_wrong_kind_for_property_panics() {
        let (mut tree, id) = tree_with_node();
        let mut txn = Transaction::new();
        Animator::new().animate(
            &mut tree,
            &mut txn,
            id,
            LayerProperty::BackgroundColor,
            &linear(100.0),
            [0.0.into(), 1.0.into()],
            AnimateOptions::default(),
        );
    }
}
