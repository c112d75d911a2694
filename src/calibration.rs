//! Color calibration gating module
//!
//! This module keeps a color-correction transform up to date from a live frame
//! stream and publishes it only when the estimate is healthy enough. It is split
//! into the frame cache and decoder, the transform and its estimator, the
//! published state, the controller that gates estimates, and the scheduler
//! that triggers periodic attempts.

pub mod common;
pub mod controller;
pub mod frame;
pub mod scheduler;
pub mod state;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use common::{
    CalibrationError,
    Result,
};

pub use frame::{
    DirectoryFrameSource,
    Frame,
    FrameCache,
    FrameDecoder,
    ImageFrameDecoder,
    RgbFrame,
};

pub use transform::{
    Estimate,
    GrayWorldEstimator,
    Health,
    Transform,
    TransformEstimator,
    HEALTH_MIN,
};

pub use state::{
    CalibrationState,
    Engagement,
};

pub use controller::{
    Controller,
    ControllerConfig,
    ControllerConfigBuilder,
    CycleOutcome,
    LogPublisher,
    Publisher,
    ToggleOutcome,
};

pub use scheduler::{
    Scheduler,
    SchedulerHandle,
};
