//! PNG frame output
//!
//! Writes rendered frames as numbered PNG files so the animation can be
//! inspected (or assembled into a video) on any platform.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tiny_skia::Pixmap;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to create frame directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write frame {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Writes numbered `frame_NNNN.png` files into a directory
#[derive(Debug)]
pub struct FrameSink {
    dir: PathBuf,
    next_index: u32,
}

impl FrameSink {
    /// Creates the sink, making the output directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, FrameError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| FrameError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, next_index: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frames_written(&self) -> u32 {
        self.next_index
    }

    /// Writes the next frame and returns its path
    pub fn write(&mut self, pixmap: &Pixmap) -> Result<PathBuf, FrameError> {
        let path = self.dir.join(format!("frame_{:04}.png", self.next_index));
        pixmap
            .save_png(&path)
            .map_err(|err| FrameError::Write {
                path: path.clone(),
                message: err.to_string(),
            })?;
        self.next_index += 1;
        Ok(path)
    }
}
