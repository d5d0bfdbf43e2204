//! Retained layer tree and the motion interpolation engine.
//!
//! This crate provides:
//! - **Layer tree**: a single-threaded scene graph of [`Layer`] nodes with
//!   model state (frame, opacity, background, mask, visibility) and a
//!   presentation table holding in-flight animated values
//! - **Motion engine**: timing models, easing, spring curves, and the
//!   [`Animator`] that turns a timing + endpoint pair into an attached
//!   property animation inside a [`Transaction`] batch
//!
//! # Architecture
//!
//! ```text
//! Animator::animate(timing, endpoints)
//!   ├── commits the destination value onto the Layer (model)
//!   └── attaches an ActiveAnimation to the Transaction
//!
//! Transaction::tick(delta_ms)
//!   ├── advances every member animation
//!   ├── writes presentation overrides (model + additive deltas)
//!   └── fires per-animation and batch completions exactly once
//! ```

pub mod animation;
mod layer;

pub use animation::animator::{AnimateOptions, Animator};
pub use animation::easing::bezier_progress;
pub use animation::spring::{SpringCurve, REST_THRESHOLD};
pub use animation::transaction::{LayerCallback, Transaction};
pub use animation::types::{AnimatableValue, AnimationState, MotionCurve, MotionTiming, ValueKind};
pub use layer::{Layer, LayerId, LayerProperty, LayerTree};
