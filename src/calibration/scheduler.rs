//! Fixed-period trigger for scheduled attempt cycles.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use tracing::{debug, info, trace, warn};

use crate::calibration::common::error::Result;
use crate::calibration::controller::{Controller, CycleOutcome, Publisher};
use crate::calibration::frame::FrameDecoder;
use crate::calibration::transform::TransformEstimator;

pub struct Scheduler {
    period: Duration,
}

/// Running scheduler thread.
///
/// Dropping the handle also stops the thread, without waiting for it.
pub struct SchedulerHandle {
    shutdown: Sender<()>,
    worker: JoinHandle<u64>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts a thread that calls [`Controller::scheduled_tick`] once per period.
    ///
    /// Ticks run on this one thread, so the scheduler never overlaps itself.
    pub fn spawn<D, E, P>(self, controller: Arc<Controller<D, E, P>>) -> Result<SchedulerHandle>
    where
        D: FrameDecoder + 'static,
        E: TransformEstimator + 'static,
        P: Publisher + 'static,
    {
        let (shutdown, stop) = bounded::<()>(0);
        let ticker = tick(self.period);
        let period = self.period;

        let worker = thread::Builder::new()
            .name("calibration-scheduler".to_string())
            .spawn(move || {
                info!("Scheduler started, period {:?}", period);
                let mut ticks = 0u64;
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            ticks += 1;
                            match controller.scheduled_tick() {
                                CycleOutcome::Idle => trace!(ticks, "Tick while idle"),
                                CycleOutcome::Busy => debug!(ticks, "Tick dropped, cycle in flight"),
                                outcome => debug!(ticks, accepted = outcome.is_accepted(), "Scheduled cycle finished"),
                            }
                        }
                        recv(stop) -> _ => break,
                    }
                }
                info!("Scheduler stopped after {} ticks", ticks);
                ticks
            })?;

        Ok(SchedulerHandle { shutdown, worker })
    }
}

impl SchedulerHandle {
    /// Stops the scheduler and returns how many ticks fired.
    ///
    /// A cycle already running is allowed to finish first.
    pub fn shutdown(self) -> u64 {
        drop(self.shutdown);
        match self.worker.join() {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!("Scheduler thread panicked: {:?}", e);
                0
            }
        }
    }
}
