//! Masked circular-reveal screen transition.
//!
//! A source control on one screen visually morphs into a full destination
//! screen and collapses back on dismissal. The pieces:
//!
//! - [`geometry`]: pure frame/anchor/radius math
//! - [`motion`]: per-transition timing bundles and their provider trait
//! - [`context`]: the per-run inputs (direction, layers, end signal)
//! - [`orchestrator`]: [`RevealTransition`], which sequences the mask
//!   choreography and submits the property animations
//! - [`presentation`]: the dismissal-lifecycle adapter that can take over
//!   scrim and source-visibility cleanup
//!
//! A run is synchronous in `start` up to the point where the returned
//! [`morph_scene::Transaction`] holds the attached animations; the caller's
//! render loop drives it with `tick` until the batch reports completion.

pub mod context;
pub mod geometry;
pub mod motion;
pub mod orchestrator;
pub mod presentation;

pub use context::{TransitionContext, TransitionDirection};
pub use motion::{MotionSpecProvider, PhaseTimings, StaticMotionSpec, TransitionMotionSpec};
pub use orchestrator::{RevealGeometry, RevealTransition, EDGE_ALIGNED_INSET};
pub use presentation::PresentationLifecycleAdapter;
