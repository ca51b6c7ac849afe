//! Export job configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExportOptions;

/// Everything needed for one export attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    /// Unique job identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Input image paths in animation order
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Path chosen in the save dialog; empty when the dialog was cancelled
    #[serde(default)]
    pub output_path: String,

    #[serde(default)]
    pub options: ExportOptions,

    #[serde(default)]
    pub backend: ExportBackend,

    /// Listing indices the user deleted after importing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_indices: Vec<usize>,

    /// Explicit tool locations, overriding platform resolution
    #[serde(default)]
    pub tools: ToolOverrides,
}

impl ExportJob {
    pub fn new(inputs: Vec<String>, output_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            inputs,
            output_path: output_path.into(),
            options: ExportOptions::default(),
            backend: ExportBackend::default(),
            remove_indices: Vec::new(),
            tools: ToolOverrides::default(),
        }
    }
}

/// Which export design to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportBackend {
    /// convert followed by gifsicle
    #[default]
    Tool,
    /// Decode and encode in-process
    Library,
}

impl ExportBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportBackend::Tool => "tool",
            ExportBackend::Library => "library",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<PathBuf>,
}
