//! Locates the external convert and gifsicle executables.
//!
//! Resolution happens once, up front, producing a `ToolPaths` value that the
//! tool pipeline receives. The pipeline itself never looks at the platform.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ToolError;
use crate::models::ToolOverrides;
use crate::platform;

/// An external tool used by the tool pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Convert,
    Optimizer,
}

impl Tool {
    /// Executable stem, also the name searched for on `PATH`.
    pub fn stem(&self) -> &'static str {
        match self {
            Tool::Convert => "convert",
            Tool::Optimizer => "gifsicle",
        }
    }

    /// Directory under `bin/` holding the bundled copy.
    fn bundle_dir(&self) -> &'static str {
        match self {
            Tool::Convert => "imagemagick",
            Tool::Optimizer => "gifsicle",
        }
    }
}

/// Resolved executable for each tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub convert: PathBuf,
    pub optimizer: PathBuf,
}

impl ToolPaths {
    pub fn get(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Convert => &self.convert,
            Tool::Optimizer => &self.optimizer,
        }
    }
}

/// Platform-specific tool locator.
pub struct DependencyLocator {
    base_path: PathBuf,
    search_path: bool,
}

impl DependencyLocator {
    /// Create a locator rooted at the worker executable's directory.
    pub fn new() -> Result<Self, ToolError> {
        let exe_path = env::current_exe().map_err(ToolError::ExecutableDir)?;
        let base_path = exe_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::with_base_path(base_path))
    }

    /// Create a locator for bundled tools under `base_path`, following the
    /// current platform's lookup convention.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            search_path: platform::TOOLS_ON_SEARCH_PATH,
        }
    }

    /// Resolve both tools, preferring explicit overrides.
    pub fn resolve(&self, overrides: &ToolOverrides) -> Result<ToolPaths, ToolError> {
        let convert = match &overrides.convert {
            Some(path) => path.clone(),
            None => self.tool_path(Tool::Convert)?,
        };
        let optimizer = match &overrides.optimizer {
            Some(path) => path.clone(),
            None => self.tool_path(Tool::Optimizer)?,
        };
        Ok(ToolPaths { convert, optimizer })
    }

    /// Get the path to one tool.
    pub fn tool_path(&self, tool: Tool) -> Result<PathBuf, ToolError> {
        if self.search_path {
            // Leave a bare name for the OS to search if `which` misses it
            return Ok(which::which(tool.stem()).unwrap_or_else(|_| PathBuf::from(tool.stem())));
        }

        let path = self.bundled_path(tool);
        if path.exists() {
            return Ok(path);
        }

        // Try system PATH as last resort
        if let Ok(system_path) = which::which(tool.stem()) {
            return Ok(system_path);
        }

        Err(ToolError::Missing {
            tool: tool.stem(),
            path,
        })
    }

    fn bundled_path(&self, tool: Tool) -> PathBuf {
        self.base_path
            .join("bin")
            .join(tool.bundle_dir())
            .join(platform::executable_name(tool.stem()))
    }
}
