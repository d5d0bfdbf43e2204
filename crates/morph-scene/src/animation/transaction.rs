//! The animation batch.
//!
//! A `Transaction` groups every property animation submitted during one
//! transition run. The caller drives it with `tick`; the batch writes
//! presentation overrides into the layer tree while members are in flight,
//! fires per-animation completions as members finish, and fires its own
//! completion callback exactly once after the last member (and every
//! deferred callback from skipped submissions) has finished — even when the
//! batch is empty.

use std::collections::HashMap;

use crate::animation::easing::bezier_progress;
use crate::animation::interpolate::{offset, zero_like, Interpolate};
use crate::animation::spring::SpringCurve;
use crate::animation::types::{AnimatableValue, AnimationState};
use crate::layer::{LayerId, LayerProperty, LayerTree};

/// Callback invoked with mutable access to the layer tree.
pub type LayerCallback = Box<dyn FnOnce(&mut LayerTree)>;

/// Curve resolved by the animator into a directly evaluable form.
pub(crate) enum ResolvedCurve {
    Bezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// The spring is evaluated over its natural settling window, so a
    /// time-scaled duration slows the oscillation uniformly.
    Spring {
        curve: SpringCurve,
        settle_secs: f32,
    },
}

/// How the animation's current value is produced.
pub(crate) enum AnimationPayload {
    /// A delta converging on zero, composed on top of the model value.
    Additive { delta: AnimatableValue },
    /// Plain from → to interpolation (path values have no additive form).
    Absolute {
        from: AnimatableValue,
        to: AnimatableValue,
    },
}

/// One attached property animation.
pub(crate) struct ActiveAnimation {
    pub layer: LayerId,
    pub property: LayerProperty,
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub curve: ResolvedCurve,
    pub payload: AnimationPayload,
    pub elapsed_ms: f32,
    pub state: AnimationState,
    pub completion: Option<LayerCallback>,
}

impl ActiveAnimation {
    /// Eased progress at the current elapsed time. Pending animations hold
    /// at 0.0, which freezes the pre-delay appearance at the start value.
    fn progress(&self) -> f32 {
        if self.state == AnimationState::Finished {
            return 1.0;
        }
        let active_elapsed = (self.elapsed_ms - self.delay_ms).max(0.0);
        let fraction = if self.duration_ms > 0.0 {
            (active_elapsed / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        match &self.curve {
            ResolvedCurve::Bezier { x1, y1, x2, y2 } => {
                bezier_progress(*x1, *y1, *x2, *y2, fraction)
            }
            ResolvedCurve::Spring { curve, settle_secs } => {
                curve.value_at(fraction * settle_secs)
            }
        }
    }

    /// Advance time. Returns `true` while the animation is still in flight.
    fn update(&mut self, delta_ms: f32) -> bool {
        match self.state {
            AnimationState::Finished => false,
            AnimationState::Pending => {
                self.elapsed_ms += delta_ms;
                if self.elapsed_ms >= self.delay_ms {
                    self.state = AnimationState::Running;
                }
                self.check_finished()
            }
            AnimationState::Running => {
                self.elapsed_ms += delta_ms;
                self.check_finished()
            }
        }
    }

    fn check_finished(&mut self) -> bool {
        if self.elapsed_ms - self.delay_ms >= self.duration_ms {
            self.state = AnimationState::Finished;
            false
        } else {
            true
        }
    }
}

/// A batch of animations with a single exactly-once completion signal.
#[derive(Default)]
pub struct Transaction {
    pub(crate) animations: Vec<ActiveAnimation>,
    /// Callbacks from skipped submissions; run on the first tick so the
    /// batch guarantee holds regardless of how many members were elided.
    deferred: Vec<LayerCallback>,
    completion: Option<LayerCallback>,
    completed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the batch completion callback.
    ///
    /// Fires exactly once, after every member animation has finished.
    pub fn on_complete(&mut self, f: impl FnOnce(&mut LayerTree) + 'static) {
        self.completion = Some(Box::new(f));
    }

    pub(crate) fn attach(&mut self, animation: ActiveAnimation) {
        tracing::trace!(
            layer = animation.layer.0,
            property = ?animation.property,
            duration_ms = animation.duration_ms,
            "attaching animation"
        );
        self.animations.push(animation);
    }

    pub(crate) fn defer(&mut self, callback: LayerCallback) {
        self.deferred.push(callback);
    }

    /// Number of attached (non-elided) animations.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn is_finished(&self) -> bool {
        self.completed
    }

    /// Advance all member animations by `delta_ms` and write presentation
    /// values into the tree. Returns `true` while the batch is running.
    pub fn tick(&mut self, delta_ms: f32, tree: &mut LayerTree) -> bool {
        if self.completed {
            return false;
        }

        for callback in self.deferred.drain(..) {
            callback(tree);
        }

        // Additive contributions on the same property sum; absolute values
        // overwrite. Accumulate first, apply after the advance pass.
        let mut additive: HashMap<(LayerId, LayerProperty), AnimatableValue> = HashMap::new();
        let mut absolute: HashMap<(LayerId, LayerProperty), AnimatableValue> = HashMap::new();

        for animation in &mut self.animations {
            if animation.state == AnimationState::Finished {
                continue;
            }
            let in_flight = animation.update(delta_ms);
            if in_flight {
                let progress = animation.progress();
                let key = (animation.layer, animation.property);
                match &animation.payload {
                    AnimationPayload::Additive { delta } => {
                        let current = delta.interpolate(&zero_like(delta), progress);
                        additive
                            .entry(key)
                            .and_modify(|sum| *sum = offset(sum, &current))
                            .or_insert(current);
                    }
                    AnimationPayload::Absolute { from, to } => {
                        absolute.insert(key, from.interpolate(to, progress));
                    }
                }
            } else {
                tree.clear_presentation_value(animation.layer, animation.property);
                if let Some(callback) = animation.completion.take() {
                    callback(tree);
                }
            }
        }

        for ((layer, property), delta_sum) in additive {
            let model = tree.model_value(layer, property);
            tree.set_presentation_value(layer, property, offset(&model, &delta_sum));
        }
        for ((layer, property), value) in absolute {
            tree.set_presentation_value(layer, property, value);
        }

        let all_finished = self
            .animations
            .iter()
            .all(|a| a.state == AnimationState::Finished);
        if all_finished {
            self.completed = true;
            if let Some(callback) = self.completion.take() {
                callback(tree);
            }
            tracing::debug!("animation batch completed");
            return false;
        }
        true
    }
}
