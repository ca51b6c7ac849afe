//! Pipeline executor for convert followed by gifsicle.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::dependency_locator::{Tool, ToolPaths};
use crate::error::ExportError;
use crate::export::Exporter;
use crate::image_collection::ImageCollection;
use crate::models::{ExportOptions, ExportStage, LogLevel};
use crate::option_mapper;
use crate::progress_reporter::ProgressReporter;

/// Runs the two external tools in sequence.
///
/// convert writes the animation, then gifsicle rewrites it in place. If
/// gifsicle fails, the unoptimized file from convert is left on disk.
pub struct ToolPipelineExporter {
    reporter: ProgressReporter,
    tools: ToolPaths,
}

impl ToolPipelineExporter {
    pub fn new(tools: ToolPaths, reporter: ProgressReporter) -> Self {
        Self { reporter, tools }
    }

    /// Run a tool to completion and capture its output.
    fn run_tool(&self, tool: Tool, args: &[OsString]) -> Result<Output, ExportError> {
        let path = self.tools.get(tool);

        self.reporter.send_log(
            LogLevel::Debug,
            &format!("{:?} {:?}", path, args),
        );

        let output = Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExportError::ToolLaunch {
                tool: tool.stem(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            self.reporter
                .send_log(LogLevel::Debug, &format!("{} stdout: {}", tool.stem(), line));
        }

        Ok(output)
    }
}

impl Exporter for ToolPipelineExporter {
    fn export(
        &self,
        images: &ImageCollection,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError> {
        let inputs: Vec<&str> = images.sources().collect();

        self.reporter.send_stage(ExportStage::Convert);
        let args = option_mapper::convert_args(options, &inputs, output);
        let result = self.run_tool(Tool::Convert, &args)?;
        if !result.status.success() {
            return Err(ExportError::ConversionFailed {
                code: result.status.code().unwrap_or(-1),
                stderr: stderr_text(&result),
            });
        }

        self.reporter.send_stage(ExportStage::Optimize);
        let args = option_mapper::optimizer_args(options, output);
        let result = self.run_tool(Tool::Optimizer, &args)?;
        if !result.status.success() {
            return Err(ExportError::OptimizationFailed {
                code: result.status.code().unwrap_or(-1),
                stderr: stderr_text(&result),
            });
        }

        Ok(())
    }
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::image_collection::PathLoader;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn collection() -> ImageCollection {
        let mut images = ImageCollection::new();
        images.import(["one.png", "two.png"], &PathLoader);
        images
    }

    #[test]
    fn test_optimizer_skipped_after_conversion_failure() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("optimizer-ran");
        let tools = ToolPaths {
            convert: script(dir.path(), "convert", "echo 'no decode delegate' >&2\nexit 3"),
            optimizer: script(
                dir.path(),
                "gifsicle",
                &format!("touch '{}'", marker.display()),
            ),
        };
        let exporter = ToolPipelineExporter::new(tools, ProgressReporter::in_memory());

        let result = exporter.export(
            &collection(),
            &ExportOptions::default(),
            &dir.path().join("out.gif"),
        );

        match result {
            Err(ExportError::ConversionFailed { code, stderr }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "no decode delegate");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!marker.exists());
    }

    #[test]
    fn test_convert_receives_mapped_arguments() {
        let dir = tempdir().unwrap();
        let args_file = dir.path().join("args");
        let tools = ToolPaths {
            convert: script(
                dir.path(),
                "convert",
                &format!("echo \"$@\" > '{}'", args_file.display()),
            ),
            optimizer: script(dir.path(), "gifsicle", "exit 0"),
        };
        let exporter = ToolPipelineExporter::new(tools, ProgressReporter::in_memory());
        let output = dir.path().join("out.gif");

        exporter
            .export(&collection(), &ExportOptions::default(), &output)
            .unwrap();

        let recorded = fs::read_to_string(&args_file).unwrap();
        assert_eq!(
            recorded.trim(),
            format!("-delay 4 -loop 0 -dispose 2 one.png two.png {}", output.display())
        );
    }

    #[test]
    fn test_missing_tool_is_launch_error() {
        let tools = ToolPaths {
            convert: PathBuf::from("/nonexistent/convert"),
            optimizer: PathBuf::from("/nonexistent/gifsicle"),
        };
        let exporter = ToolPipelineExporter::new(tools, ProgressReporter::in_memory());

        let result = exporter.export(&collection(), &ExportOptions::default(), Path::new("x.gif"));

        assert!(matches!(
            result,
            Err(ExportError::ToolLaunch { tool: "convert", .. })
        ));
    }
}
