//! Export orchestration shared by both backends.

use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::image_collection::ImageCollection;
use crate::models::{ExportOptions, ExportState, LogLevel};
use crate::progress_reporter::ProgressReporter;

/// Writes an animated GIF from an image collection.
pub trait Exporter {
    fn export(
        &self,
        images: &ImageCollection,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError>;
}

impl<E: Exporter + ?Sized> Exporter for Box<E> {
    fn export(
        &self,
        images: &ImageCollection,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError> {
        (**self).export(images, options, output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// No output path was chosen; nothing ran.
    Cancelled,
}

/// Append `.gif` unless the chosen path already ends with it.
///
/// Returns `None` for an empty path, i.e. a cancelled save dialog.
pub fn resolve_output_path(chosen: &str) -> Option<PathBuf> {
    if chosen.is_empty() {
        return None;
    }
    if chosen.ends_with(".gif") {
        Some(PathBuf::from(chosen))
    } else {
        Some(PathBuf::from(format!("{}.gif", chosen)))
    }
}

/// Drives one export at a time and tracks its state.
pub struct ExportOrchestrator<E> {
    exporter: E,
    reporter: ProgressReporter,
    state: ExportState,
}

impl<E: Exporter> ExportOrchestrator<E> {
    pub fn new(exporter: E, reporter: ProgressReporter) -> Self {
        Self {
            exporter,
            reporter,
            state: ExportState::Idle,
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Return to `Idle` once the outcome has been shown to the user.
    pub fn acknowledge(&mut self) {
        if self.state.is_finished() {
            self.state = ExportState::Idle;
        }
    }

    /// Run a single export. Blocks until every step has finished.
    pub fn export(
        &mut self,
        images: &ImageCollection,
        options: &ExportOptions,
        chosen_path: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(output) = resolve_output_path(chosen_path) else {
            self.reporter
                .send_log(LogLevel::Info, "No output path chosen, export skipped");
            return Ok(ExportOutcome::Cancelled);
        };

        self.state = ExportState::Exporting;
        self.reporter.send_log(
            LogLevel::Info,
            &format!("Exporting {} frames to {:?}", images.len(), output),
        );

        let result = if images.is_empty() {
            Err(ExportError::NoImages)
        } else {
            self.exporter.export(images, options, &output)
        };

        match result {
            Ok(()) => {
                self.state = ExportState::Succeeded {
                    output_path: output.to_string_lossy().into_owned(),
                };
                Ok(ExportOutcome::Written(output))
            }
            Err(e) => {
                self.state = ExportState::Failed {
                    error: e.to_string(),
                };
                Err(e)
            }
        }
    }
}
