//! Outbound notifications.

use tracing::info;
use crate::calibration::frame::types::RgbFrame;
use crate::calibration::transform::types::{Health, Transform};

/// Receives published calibration changes.
///
/// Transform and health notifications are delivered while the controller
/// holds its state lock, so they arrive in the order the state changed.
/// Implementations must return promptly and must not call back into the
/// controller.
pub trait Publisher: Send + Sync {
    fn on_transform_changed(&self, transform: &Transform);

    fn on_health_reported(&self, health: Health);

    /// Called for every incoming frame when corrected-frame publishing is on.
    fn on_corrected_frame(&self, _frame: &RgbFrame) {}
}

/// Publisher that only logs what it receives.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl Publisher for LogPublisher {
    fn on_transform_changed(&self, transform: &Transform) {
        info!(%transform, "Transform published");
    }

    fn on_health_reported(&self, health: Health) {
        info!(health, "Health published");
    }
}
