//! Frame decoder backed by the `image` crate.
//!
//! Compressed camera frames (JPEG, PNG) are decoded and converted to 8-bit
//! interleaved RGB regardless of the source color type.

use tracing::debug;
use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::frame::decoder::FrameDecoder;
use crate::calibration::frame::types::{Frame, RgbFrame};

/// Decoder that guesses the container format from the frame bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFrameDecoder;

impl FrameDecoder for ImageFrameDecoder {
    fn decode(&self, frame: &Frame) -> Result<RgbFrame> {
        debug!("Decoding frame #{}, {} bytes", frame.sequence, frame.data.len());

        let decoded = image::load_from_memory(&frame.data)
            .map_err(|e| CalibrationError::Decode(e.to_string()))?
            .to_rgb8();

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(CalibrationError::Decode(format!(
                "empty image: width={width}, height={height}"
            )));
        }

        debug!("Decoded frame: {}x{}", width, height);

        Ok(RgbFrame {
            width,
            height,
            data: decoded.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decodes_png_to_rgb() {
        let img = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
        let frame = Frame::new(encode_png(&img));

        let rgb = ImageFrameDecoder.decode(&frame).unwrap();

        assert_eq!((rgb.width, rgb.height), (4, 2));
        assert_eq!(rgb.pixel_count(), 8);
        assert!(rgb.pixels().all(|px| px == [10, 20, 30]));
    }

    #[test]
    fn test_malformed_bytes_are_decode_errors() {
        let frame = Frame::new(b"definitely not a jpeg".to_vec());

        let result = ImageFrameDecoder.decode(&frame);

        assert!(matches!(result, Err(CalibrationError::Decode(_))));
    }
}
