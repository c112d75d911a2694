//! Frame handling module
//!
//! This module holds the last-value frame cache, the decoder seam that turns
//! an opaque frame into RGB pixels, and a directory-backed frame source.

mod cache;
mod decoder;
mod directory_source;
mod image_decoder;
pub mod types;

pub use cache::FrameCache;
pub use decoder::FrameDecoder;
pub use directory_source::DirectoryFrameSource;
pub use image_decoder::ImageFrameDecoder;
pub use types::{Frame, RgbFrame};
