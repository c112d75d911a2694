//! Color transform module
//!
//! This module defines the per-channel shift/scale transform, the health
//! score that accompanies each estimate, and the estimator seam.

mod estimator;
mod gray_world;
pub mod types;

pub use estimator::TransformEstimator;
pub use gray_world::GrayWorldEstimator;
pub use types::{Estimate, Health, Transform, HEALTH_MIN};
