use crate::calibration::frame::types::RgbFrame;
use crate::calibration::transform::types::Estimate;

pub trait TransformEstimator: Send + Sync {
    fn compute(&self, frame: &RgbFrame) -> Estimate;
}
