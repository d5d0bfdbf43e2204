//! Per-transition motion timing bundles.
//!
//! A transition carries two [`PhaseTimings`] bundles, one per direction, plus
//! the placement flags that shape the mask geometry. Bundles are plain serde
//! data so product-tuned variants can live in configuration.

use serde::{Deserialize, Serialize};

use morph_scene::MotionTiming;

use crate::context::TransitionContext;

/// One motion timing per animated property of a transition phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTimings {
    /// Destination content opacity.
    pub content_fade: MotionTiming,
    /// Flood-fill background color.
    pub fill_fade: MotionTiming,
    /// Mask container scale transform.
    pub mask_scale: MotionTiming,
    /// Mask container horizontal center.
    pub horizontal_move: MotionTiming,
    /// Mask container vertical center.
    pub vertical_move: MotionTiming,
    /// Dimming layer opacity.
    pub scrim_fade: MotionTiming,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        // Standard-curve defaults; content lags slightly behind the fill so
        // the color bleed reads before the content does.
        Self {
            content_fade: MotionTiming::bezier(225.0, 0.4, 0.0, 0.2, 1.0).with_delay(75.0),
            fill_fade: MotionTiming::bezier(120.0, 0.4, 0.0, 0.2, 1.0),
            mask_scale: MotionTiming::bezier(300.0, 0.4, 0.0, 0.2, 1.0),
            horizontal_move: MotionTiming::bezier(300.0, 0.4, 0.0, 0.2, 1.0),
            vertical_move: MotionTiming::bezier(300.0, 0.4, 0.0, 0.2, 1.0),
            scrim_fade: MotionTiming::bezier(150.0, 0.4, 0.0, 0.2, 1.0),
        }
    }
}

/// The full motion description of one reveal transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionMotionSpec {
    /// Timings for the forward (presentation) run.
    pub expansion: PhaseTimings,
    /// Timings for the backward (dismissal) run.
    pub collapse: PhaseTimings,
    /// Grow from the source element's center instead of an edge-aligned
    /// placement below it.
    pub is_centered: bool,
    /// The next backward run should delegate to a plain slide instead of
    /// collapsing through the mask.
    pub should_slide_when_collapsed: bool,
}

impl Default for TransitionMotionSpec {
    fn default() -> Self {
        Self {
            expansion: PhaseTimings::default(),
            collapse: PhaseTimings::default(),
            is_centered: true,
            should_slide_when_collapsed: false,
        }
    }
}

/// Source of the motion description for a run.
///
/// A pure function of the context, queried once per run.
pub trait MotionSpecProvider {
    fn spec_for(&self, ctx: &TransitionContext) -> TransitionMotionSpec;
}

/// Provider that returns the same fixed description for every run.
#[derive(Debug, Clone, Default)]
pub struct StaticMotionSpec(pub TransitionMotionSpec);

impl MotionSpecProvider for StaticMotionSpec {
    fn spec_for(&self, _ctx: &TransitionContext) -> TransitionMotionSpec {
        self.0.clone()
    }
}
