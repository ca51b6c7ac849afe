//! Worker messages and export state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from worker to front-end via stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerMessage {
    /// Log message
    Log {
        level: LogLevel,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Outcome of an import batch
    Import {
        added: usize,
        duplicates: usize,
        failed: Vec<String>,
    },

    /// An export step started
    Stage { stage: ExportStage },

    /// Error to show to the user
    Error { message: String },

    /// Job completion
    Complete {
        success: bool,
        #[serde(rename = "outputPath", skip_serializing_if = "Option::is_none")]
        output_path: Option<String>,
        #[serde(rename = "jobId", skip_serializing_if = "Option::is_none")]
        job_id: Option<Uuid>,
    },
}

impl WorkerMessage {
    /// Create a log message.
    pub fn log(level: LogLevel, message: &str) -> Self {
        WorkerMessage::Log {
            level,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Create an error message.
    pub fn error(message: &str) -> Self {
        WorkerMessage::Error {
            message: message.to_string(),
        }
    }

    /// Create a completion message.
    pub fn complete(success: bool, output_path: Option<&str>, job_id: Option<Uuid>) -> Self {
        WorkerMessage::Complete {
            success,
            output_path: output_path.map(String::from),
            job_id,
        }
    }
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStage {
    Convert,
    Optimize,
    Encode,
}

/// Export state machine. Every attempt returns to `Idle` once reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportState {
    Idle,
    Exporting,
    Succeeded { output_path: String },
    Failed { error: String },
}

impl ExportState {
    pub fn is_active(&self) -> bool {
        matches!(self, ExportState::Exporting)
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ExportState::Succeeded { .. } | ExportState::Failed { .. }
        )
    }
}
