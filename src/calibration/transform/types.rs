//! Transform data types

use std::fmt;

use crate::calibration::frame::types::RgbFrame;

/// Confidence score of an estimated transform; larger is better.
pub type Health = f64;

/// Estimates with health at or below this value are never published.
pub const HEALTH_MIN: Health = 0.001;

/// Per-channel color correction: `corrected = value * scale + shift`.
///
/// Channels are ordered R, G, B. The flattened form is
/// `(shiftR, shiftG, shiftB, scaleR, scaleG, scaleB)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub shift: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        shift: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
    };

    pub fn new(shift: [f64; 3], scale: [f64; 3]) -> Self {
        Self { shift, scale }
    }

    pub fn from_array(s: [f64; 6]) -> Self {
        Self {
            shift: [s[0], s[1], s[2]],
            scale: [s[3], s[4], s[5]],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        let [r, g, b] = self.shift;
        let [sr, sg, sb] = self.scale;
        [r, g, b, sr, sg, sb]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Corrects one RGB pixel, clipping each channel to the 8-bit range.
    pub fn correct_pixel(&self, px: [u8; 3]) -> [u8; 3] {
        let mut out = [0u8; 3];
        for c in 0..3 {
            let v = f64::from(px[c]) * self.scale[c] + self.shift[c];
            // NaN saturates to 0 in the cast
            out[c] = v.clamp(0.0, 255.0) as u8;
        }
        out
    }

    pub fn apply(&self, frame: &RgbFrame) -> RgbFrame {
        let mut data = Vec::with_capacity(frame.data.len());
        for px in frame.pixels() {
            data.extend_from_slice(&self.correct_pixel(px));
        }
        RgbFrame {
            width: frame.width,
            height: frame.height,
            data,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_array();
        write!(
            f,
            "shift=({:.3}, {:.3}, {:.3}) scale=({:.3}, {:.3}, {:.3})",
            s[0], s[1], s[2], s[3], s[4], s[5]
        )
    }
}

/// A candidate transform together with its health score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub transform: Transform,
    pub health: Health,
}
