//! Property animation subsystem: timing models, curves, the additive
//! interpolation engine, and transaction batching.

pub mod animator;
pub mod easing;
pub mod interpolate;
pub mod spring;
pub mod transaction;
pub mod types;
