use std::time::{Duration, Instant};

use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Step durations of one attempt cycle.
#[derive(Debug, Default)]
pub struct CycleTimings {
    steps: Vec<StepTiming>,
}

impl CycleTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, (name, duration): (&'static str, Duration)) {
        self.steps.push(StepTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.steps
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.duration)
            .reduce(|a, b| a + b)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .steps
            .iter()
            .map(|s| format!("{}={:.3}ms", s.name, s.duration.as_secs_f64() * 1000.0))
            .collect();
        parts.push(format!("total={:.3}ms", self.total_duration().as_secs_f64() * 1000.0));
        parts.join(" ")
    }

    pub fn log_summary(&self, sequence: u64, verbose: bool) {
        if verbose {
            info!("Cycle timings for frame #{}: {}", sequence, self.summary());
        } else {
            debug!("Cycle timings for frame #{}: {}", sequence, self.summary());
        }
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}
