//! Progress reporting via JSON on stdout.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::image_collection::ImportReport;
use crate::models::{ExportStage, LogLevel, WorkerMessage};

/// Thread-safe reporter that outputs one JSON message per line.
#[derive(Clone)]
pub struct ProgressReporter {
    inner: Arc<ProgressReporterInner>,
}

enum ProgressReporterInner {
    Stdout(Mutex<()>),
    Memory(Mutex<Vec<WorkerMessage>>),
}

impl ProgressReporter {
    /// Create a reporter writing to stdout.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProgressReporterInner::Stdout(Mutex::new(()))),
        }
    }

    /// Create a reporter that keeps messages in memory instead of printing them.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(ProgressReporterInner::Memory(Mutex::new(Vec::new()))),
        }
    }

    /// Messages recorded by an in-memory reporter.
    pub fn messages(&self) -> Vec<WorkerMessage> {
        match &*self.inner {
            ProgressReporterInner::Memory(messages) => messages
                .lock()
                .map(|m| m.clone())
                .unwrap_or_default(),
            ProgressReporterInner::Stdout(_) => Vec::new(),
        }
    }

    /// Send a log message.
    pub fn send_log(&self, level: LogLevel, message: &str) {
        self.send_message(WorkerMessage::log(level, message));
    }

    /// Send the summary of an import batch.
    pub fn send_import(&self, report: &ImportReport) {
        self.send_message(WorkerMessage::Import {
            added: report.added(),
            duplicates: report.duplicates(),
            failed: report
                .failures()
                .map(|(path, _)| path.to_string())
                .collect(),
        });
    }

    /// Announce an export step.
    pub fn send_stage(&self, stage: ExportStage) {
        self.send_message(WorkerMessage::Stage { stage });
    }

    /// Send an error message.
    pub fn send_error(&self, message: &str) {
        self.send_message(WorkerMessage::error(message));
    }

    /// Send a completion message.
    pub fn send_complete(&self, success: bool, output_path: Option<&str>, job_id: Option<Uuid>) {
        self.send_message(WorkerMessage::complete(success, output_path, job_id));
    }

    fn send_message(&self, message: WorkerMessage) {
        match &*self.inner {
            ProgressReporterInner::Stdout(output_lock) => {
                let _lock = output_lock.lock();

                match serde_json::to_string(&message) {
                    Ok(json) => {
                        let stdout = io::stdout();
                        let mut handle = stdout.lock();
                        if let Err(e) = writeln!(handle, "{}", json) {
                            eprintln!("Failed to write to stdout: {}", e);
                        }
                        let _ = handle.flush();
                    }
                    Err(e) => {
                        eprintln!("Failed to serialize message: {}", e);
                    }
                }
            }
            ProgressReporterInner::Memory(messages) => {
                if let Ok(mut messages) = messages.lock() {
                    messages.push(message);
                }
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
