//! Last-value frame cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::calibration::frame::types::Frame;

/// Holds the most recently received frame.
///
/// Every store overwrites the previous frame; nothing is queued. Readers get a
/// shared handle, so a frame being decoded stays alive after it is replaced.
#[derive(Debug, Default)]
pub struct FrameCache {
    latest: RwLock<Option<Arc<Frame>>>,
    received: AtomicU64,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `frame` as the latest and stamps its arrival sequence number.
    pub fn store(&self, mut frame: Frame) -> Arc<Frame> {
        frame.sequence = self.received.fetch_add(1, Ordering::Relaxed) + 1;
        let frame = Arc::new(frame);
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&frame));
        frame
    }

    pub fn latest(&self) -> Option<Arc<Frame>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_frame(&self) -> bool {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of frames stored since creation.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}
