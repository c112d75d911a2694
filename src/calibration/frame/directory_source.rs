//! Frame source that replays image files from a directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use crate::calibration::common::error::{CalibrationError, Result};
use crate::calibration::frame::types::Frame;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Yields the image files of a directory in name order, wrapping around at the end.
#[derive(Debug)]
pub struct DirectoryFrameSource {
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectoryFrameSource {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if path.is_file() && is_image {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(CalibrationError::InvalidConfig(format!(
                "no image files in {}",
                dir.display()
            )));
        }
        files.sort();

        debug!("Frame source {} has {} files", dir.display(), files.len());
        Ok(Self { files, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn next_frame(&mut self) -> Result<Frame> {
        let path = &self.files[self.next];
        self.next = (self.next + 1) % self.files.len();
        let data = std::fs::read(path)?;
        Ok(Frame::new(data))
    }
}
