//! Gray-world reference estimator.
//!
//! Assumes the scene averages to neutral gray: each channel is scaled so its
//! mean lands on the mean of all three channels. Health is the share of
//! pixels with no clipped channel, which drops towards zero for black,
//! blown-out, or single-color frames.

use tracing::debug;
use crate::calibration::frame::types::RgbFrame;
use crate::calibration::transform::estimator::TransformEstimator;
use crate::calibration::transform::types::{Estimate, Transform};

/// Channel means below this carry too little signal to scale.
const MIN_CHANNEL_MEAN: f64 = 1.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct GrayWorldEstimator;

impl TransformEstimator for GrayWorldEstimator {
    fn compute(&self, frame: &RgbFrame) -> Estimate {
        let count = frame.pixel_count();
        if count == 0 {
            return Estimate {
                transform: Transform::IDENTITY,
                health: 0.0,
            };
        }

        let mut sums = [0u64; 3];
        let mut unclipped = 0usize;
        for px in frame.pixels() {
            for c in 0..3 {
                sums[c] += u64::from(px[c]);
            }
            if px.iter().all(|&v| v > u8::MIN && v < u8::MAX) {
                unclipped += 1;
            }
        }

        let means = sums.map(|s| s as f64 / count as f64);
        debug!("Channel means: {:.2}, {:.2}, {:.2}", means[0], means[1], means[2]);

        if means.iter().any(|&m| m < MIN_CHANNEL_MEAN) {
            return Estimate {
                transform: Transform::IDENTITY,
                health: 0.0,
            };
        }

        let gray = means.iter().sum::<f64>() / 3.0;
        Estimate {
            transform: Transform::new([0.0; 3], means.map(|m| gray / m)),
            health: unclipped as f64 / count as f64,
        }
    }
}
