use crate::calibration::common::error::Result;
use crate::calibration::frame::types::{Frame, RgbFrame};

pub trait FrameDecoder: Send + Sync {
    fn decode(&self, frame: &Frame) -> Result<RgbFrame>;
}
