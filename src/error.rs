//! Error types for import, tool resolution and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An option value outside its enumerated domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Frame rate {0} is outside the supported range 24-30")]
    FrameRate(u32),

    #[error("Disposal mode {0} is not one of 0-3")]
    Disposal(u8),

    #[error("Optimization level {0} is not one of 1-3")]
    Optimization(u8),

    #[error("Scale {0}% is outside the supported range 1-200")]
    Scale(u32),
}

/// Why a single path could not be imported.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// A required external tool could not be located.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to locate worker executable: {0}")]
    ExecutableDir(#[source] io::Error),

    #[error("{tool} not found at {path:?}")]
    Missing { tool: &'static str, path: PathBuf },
}

/// Failures that end an export attempt.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No images to export")]
    NoImages,

    #[error("Failed to start {tool}: {source}")]
    ToolLaunch {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Imagemagick conversion failed (exit code {code}): {stderr}")]
    ConversionFailed { code: i32, stderr: String },

    #[error("gifsicle processing failed (exit code {code}): {stderr}")]
    OptimizationFailed { code: i32, stderr: String },

    #[error("Frame {index} is not in memory; the library backend needs decoded images")]
    FrameNotDecoded { index: usize },

    #[error("Frame {index} is {width}x{height}, larger than a GIF frame allows")]
    FrameTooLarge { index: usize, width: u32, height: u32 },

    #[error("GIF encoding failed: {0}")]
    Encode(#[from] gif::EncodingError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
