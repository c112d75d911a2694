//! Controller configuration types

use std::time::Duration;

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::transform::types::{Health, HEALTH_MIN};

/// Reference period between scheduled attempt cycles.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(2);

/// Configuration for the calibration controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Interval between scheduled attempt cycles
    pub period: Duration,
    /// Estimates must have health strictly above this to be published
    pub health_min: Health,
    /// Whether every incoming frame is corrected and handed to the publisher
    pub publish_corrected: bool,
    /// Log per-cycle step timings at info instead of debug
    pub verbose: bool,
    /// Initial position of the switch that enables scheduled cycles
    pub active: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            health_min: HEALTH_MIN,
            publish_corrected: false,
            verbose: true,
            active: true,
        }
    }
}

impl ControllerConfig {
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.period.is_zero() {
            return Err(CalibrationError::InvalidConfig(
                "scheduling period must be greater than zero".to_string(),
            ));
        }
        if !self.health_min.is_finite() {
            return Err(CalibrationError::InvalidConfig(format!(
                "health threshold must be finite, got {}",
                self.health_min
            )));
        }
        Ok(())
    }
}

/// Builder for ControllerConfig
#[derive(Default)]
pub struct ControllerConfigBuilder {
    period: Option<Duration>,
    health_min: Option<Health>,
    publish_corrected: Option<bool>,
    verbose: Option<bool>,
    active: Option<bool>,
}

impl ControllerConfigBuilder {
    pub fn period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    pub fn health_min(mut self, health_min: Health) -> Self {
        self.health_min = Some(health_min);
        self
    }

    pub fn publish_corrected(mut self, enable: bool) -> Self {
        self.publish_corrected = Some(enable);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn build(self) -> ControllerConfig {
        let default = ControllerConfig::default();
        ControllerConfig {
            period: self.period.unwrap_or(default.period),
            health_min: self.health_min.unwrap_or(default.health_min),
            publish_corrected: self.publish_corrected.unwrap_or(default.publish_corrected),
            verbose: self.verbose.unwrap_or(default.verbose),
            active: self.active.unwrap_or(default.active),
        }
    }
}
