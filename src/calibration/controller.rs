//! Calibration controller
//!
//! Decides when a recalibration is attempted, whether its result is
//! published, and how the published transform moves between engaged and
//! disengaged. All frame-arrival, toggle and timer entry points may be called
//! from different threads.

mod config;
mod publisher;
mod timing;


pub use config::{ControllerConfig, ControllerConfigBuilder, DEFAULT_PERIOD};
pub use publisher::{LogPublisher, Publisher};
pub use timing::{CycleTimings, StepTiming, Timer};

use std::sync::{Mutex, TryLockError};

use tracing::{debug, info, instrument, warn};

use crate::calibration::{
    common::{
        error::{CalibrationError, Result},
        lock,
    },
    frame::{Frame, FrameCache, FrameDecoder, ImageFrameDecoder},
    state::{CalibrationState, Engagement},
    transform::{Estimate, GrayWorldEstimator, Transform, TransformEstimator},
};

/// Result of one attempt cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The estimate passed the health gate and was published.
    Accepted(Estimate),
    /// The cycle ended without touching the published state.
    Skipped(CalibrationError),
    /// Scheduled tick while disengaged or switched off; nothing was attempted.
    Idle,
    /// Scheduled tick dropped because another cycle was in flight.
    Busy,
}

impl CycleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CycleOutcome::Accepted(_))
    }
}

/// Result of a toggle edge.
#[derive(Debug)]
pub enum ToggleOutcome {
    /// Switched on; carries the immediate attempt cycle.
    Engaged(CycleOutcome),
    /// Switched off; identity has been published.
    Disengaged,
    /// No frame has been seen yet, state unchanged.
    Ignored,
}

#[derive(Debug)]
struct Shared {
    calibration: CalibrationState,
    active: bool,
}

pub struct Controller<D: FrameDecoder, E: TransformEstimator, P: Publisher> {
    decoder: D,
    estimator: E,
    publisher: P,
    config: ControllerConfig,
    frames: FrameCache,
    state: Mutex<Shared>,
    // Held for the whole of an attempt cycle.
    cycle: Mutex<()>,
}

impl Controller<ImageFrameDecoder, GrayWorldEstimator, LogPublisher> {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        Self::with_custom(ImageFrameDecoder, GrayWorldEstimator, LogPublisher, config)
    }
}

impl<D: FrameDecoder, E: TransformEstimator, P: Publisher> Controller<D, E, P> {
    pub fn with_custom(decoder: D, estimator: E, publisher: P, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let active = config.active;
        Ok(Self {
            decoder,
            estimator,
            publisher,
            config,
            frames: FrameCache::new(),
            state: Mutex::new(Shared {
                calibration: CalibrationState::new(),
                active,
            }),
            cycle: Mutex::new(()),
        })
    }

    /// Caches an incoming frame and, if enabled, publishes its corrected version.
    pub fn on_frame(&self, frame: Frame) {
        let frame = self.frames.store(frame);
        if !self.config.publish_corrected {
            return;
        }

        let transform = self.snapshot().transform();
        match self.decoder.decode(&frame) {
            Ok(rgb) => {
                let corrected = transform.apply(&rgb);
                self.publisher.on_corrected_frame(&corrected);
            }
            Err(e) => warn!("Cannot correct frame #{}: {}", frame.sequence, e),
        }
    }

    /// Handles one toggle edge.
    ///
    /// Engaging runs an attempt cycle on the caller's thread before returning.
    /// Disengaging publishes identity immediately and never waits for a cycle
    /// in flight.
    #[instrument(skip(self))]
    pub fn toggle(&self) -> ToggleOutcome {
        if !self.frames.has_frame() {
            info!("{}", CalibrationError::ToggleWithoutFrame);
            return ToggleOutcome::Ignored;
        }

        let next = {
            let mut shared = lock(&self.state);
            let next = shared.calibration.engagement().toggled();
            match next {
                Engagement::Engaged => shared.calibration.engage(),
                Engagement::Disengaged => {
                    shared.calibration.disengage();
                    self.publisher.on_transform_changed(&Transform::IDENTITY);
                }
            }
            next
        };

        match next {
            Engagement::Engaged => {
                info!("Color transform is turned ON");
                ToggleOutcome::Engaged(self.attempt_cycle())
            }
            Engagement::Disengaged => {
                info!("Color transform is turned OFF");
                ToggleOutcome::Disengaged
            }
        }
    }

    /// Runs one attempt cycle, waiting for any cycle already in flight.
    pub fn attempt_cycle(&self) -> CycleOutcome {
        let _cycle = lock(&self.cycle);
        self.run_cycle()
    }

    /// Timer entry point: a cheap no-op unless engaged and switched on, and
    /// dropped rather than queued when a cycle is already running.
    pub fn scheduled_tick(&self) -> CycleOutcome {
        {
            let shared = lock(&self.state);
            if !shared.active || !shared.calibration.is_engaged() {
                return CycleOutcome::Idle;
            }
        }

        let _cycle = match self.cycle.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!("Attempt cycle already in flight, dropping tick");
                return CycleOutcome::Busy;
            }
        };
        self.run_cycle()
    }

    /// Switch consulted by scheduled ticks only.
    pub fn set_active(&self, active: bool) {
        lock(&self.state).active = active;
        info!(active, "Scheduled recalibration switch set");
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    pub fn snapshot(&self) -> CalibrationState {
        lock(&self.state).calibration
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn frames(&self) -> &FrameCache {
        &self.frames
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    #[instrument(skip(self))]
    fn run_cycle(&self) -> CycleOutcome {
        let Some(frame) = self.frames.latest() else {
            debug!("{}", CalibrationError::NoFrameAvailable);
            return CycleOutcome::Skipped(CalibrationError::NoFrameAvailable);
        };
        if !self.snapshot().is_engaged() {
            debug!("Not engaged, skipping frame #{}", frame.sequence);
            return CycleOutcome::Skipped(CalibrationError::NotEngaged);
        }

        info!("Computing color transform from frame #{}", frame.sequence);
        let mut timings = CycleTimings::new();

        let timer = Timer::start("decode");
        let decoded = {
            let _span = tracing::info_span!("decode_frame", sequence = frame.sequence).entered();
            self.decoder.decode(&frame)
        };
        timings.record(timer.stop());
        let rgb = match decoded {
            Ok(rgb) => rgb,
            Err(e) => {
                warn!("Cannot decode frame #{}: {}", frame.sequence, e);
                return CycleOutcome::Skipped(e);
            }
        };

        let timer = Timer::start("estimate");
        let estimate = {
            let _span = tracing::info_span!("estimate_transform", width = rgb.width, height = rgb.height).entered();
            self.estimator.compute(&rgb)
        };
        timings.record(timer.stop());
        timings.log_summary(frame.sequence, self.config.verbose);

        self.gate(estimate)
    }

    fn gate(&self, estimate: Estimate) -> CycleOutcome {
        let threshold = self.config.health_min;
        // Negated so a NaN health is rejected.
        if !(estimate.health > threshold) {
            info!(health = estimate.health, threshold, "Health is not good, keeping current transform");
            return CycleOutcome::Skipped(CalibrationError::InsufficientHealth {
                health: estimate.health,
                threshold,
            });
        }

        let mut shared = lock(&self.state);
        if let Err(e) = shared.calibration.accept(&estimate) {
            info!("Discarding estimate: {}", e);
            return CycleOutcome::Skipped(e);
        }
        self.publisher.on_health_reported(estimate.health);
        self.publisher.on_transform_changed(&estimate.transform);

        info!(health = estimate.health, transform = %estimate.transform, "Color transform published");
        CycleOutcome::Accepted(estimate)
    }
}
