//! Frame data types

use std::sync::Arc;
use std::time::Instant;

/// An encoded frame as received from the camera stream.
///
/// The payload is opaque to the controller; only a [`FrameDecoder`](super::FrameDecoder)
/// interprets it.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Arrival order assigned by the [`FrameCache`](super::FrameCache), starting at 1
    pub sequence: u64,
    /// When the frame reached this process
    pub received_at: Instant,
    /// Encoded image bytes (JPEG or PNG for the bundled decoder)
    pub data: Arc<[u8]>,
}

impl Frame {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            sequence: 0,
            received_at: Instant::now(),
            data: data.into(),
        }
    }
}

/// Decoded frame pixels
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

impl RgbFrame {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|px| [px[0], px[1], px[2]])
    }
}
