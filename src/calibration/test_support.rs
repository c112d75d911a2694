//! Deterministic collaborators shared by controller and scheduler tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::controller::{Controller, ControllerConfig, Publisher};
use crate::calibration::frame::{Frame, FrameDecoder, RgbFrame};
use crate::calibration::transform::{Estimate, Health, Transform, TransformEstimator};

pub struct MockDecoder {
    pub should_fail: bool,
}

impl FrameDecoder for MockDecoder {
    fn decode(&self, frame: &Frame) -> Result<RgbFrame> {
        if self.should_fail {
            return Err(CalibrationError::Decode("Mock decode error".to_string()));
        }
        // One gray pixel whose value is the first payload byte.
        let v = frame.data.first().copied().unwrap_or(0);
        Ok(RgbFrame {
            width: 1,
            height: 1,
            data: vec![v, v, v],
        })
    }
}

/// Returns scripted estimates in order, repeating the last one when exhausted.
pub struct ScriptedEstimator {
    script: Mutex<VecDeque<Estimate>>,
    last: Mutex<Estimate>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedEstimator {
    pub fn new(script: impl IntoIterator<Item = Estimate>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(estimate(Transform::IDENTITY, 0.0)),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransformEstimator for ScriptedEstimator {
    fn compute(&self, _frame: &RgbFrame) -> Estimate {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Transform(Transform),
    Health(Health),
    Corrected(RgbFrame),
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<Event>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn transforms(&self) -> Vec<Transform> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Transform(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

impl Publisher for RecordingPublisher {
    fn on_transform_changed(&self, transform: &Transform) {
        self.events.lock().unwrap().push(Event::Transform(*transform));
    }

    fn on_health_reported(&self, health: Health) {
        self.events.lock().unwrap().push(Event::Health(health));
    }

    fn on_corrected_frame(&self, frame: &RgbFrame) {
        self.events.lock().unwrap().push(Event::Corrected(frame.clone()));
    }
}

pub type TestController = Controller<MockDecoder, ScriptedEstimator, RecordingPublisher>;

pub fn estimate(transform: Transform, health: Health) -> Estimate {
    Estimate { transform, health }
}

pub fn warm_transform() -> Transform {
    Transform::from_array([4.0, -2.0, 1.5, 1.2, 0.9, 1.1])
}

pub fn controller(estimator: ScriptedEstimator) -> TestController {
    controller_with(estimator, ControllerConfig::default(), false)
}

pub fn controller_with(estimator: ScriptedEstimator, config: ControllerConfig, decode_fails: bool) -> TestController {
    Controller::with_custom(
        MockDecoder { should_fail: decode_fails },
        estimator,
        RecordingPublisher::default(),
        config,
    )
    .unwrap()
}
