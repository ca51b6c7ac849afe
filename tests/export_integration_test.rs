//! End-to-end export scenarios against the public library API.
//!
//! The tool pipeline is exercised with shell scripts standing in for
//! convert and gifsicle.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::{tempdir, TempDir};

use gifstitch_worker::dependency_locator::ToolPaths;
use gifstitch_worker::error::ExportError;
use gifstitch_worker::export::{ExportOrchestrator, ExportOutcome};
use gifstitch_worker::frame_encoder::FrameEncoderExporter;
use gifstitch_worker::image_collection::{DecodingLoader, ImageCollection, PathLoader};
use gifstitch_worker::models::{ExportOptions, ExportState, WorkerMessage};
use gifstitch_worker::pipeline_executor::ToolPipelineExporter;
use gifstitch_worker::progress_reporter::ProgressReporter;

/// Write small solid-colour PNGs and return their paths.
fn write_fixtures(dir: &Path, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("frame_{}.png", i));
            let shade = (i * 60) as u8;
            RgbaImage::from_pixel(10, 10, Rgba([shade, 128, 255 - shade, 255]))
                .save(&path)
                .unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect()
}

#[cfg(unix)]
fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// convert stand-in: writes a placeholder to its last argument.
#[cfg(unix)]
fn fake_tools(dir: &Path, optimizer_exit: i32) -> ToolPaths {
    ToolPaths {
        convert: fake_tool(
            dir,
            "convert",
            "for last; do :; done\nprintf 'GIF89a' > \"$last\"",
        ),
        optimizer: fake_tool(
            dir,
            "gifsicle",
            &format!("echo 'gifsicle: simulated failure' >&2\nexit {}", optimizer_exit),
        ),
    }
}

fn import_fixtures(count: usize) -> (TempDir, ImageCollection) {
    let dir = tempdir().unwrap();
    let paths = write_fixtures(dir.path(), count);
    let mut images = ImageCollection::new();
    let report = images.import(&paths, &PathLoader);
    assert_eq!(report.added(), count);
    (dir, images)
}

#[cfg(unix)]
#[test]
fn tool_pipeline_success_writes_output() {
    let (dir, images) = import_fixtures(3);
    let reporter = ProgressReporter::in_memory();
    let exporter = ToolPipelineExporter::new(fake_tools(dir.path(), 0), reporter.clone());
    let mut orchestrator = ExportOrchestrator::new(exporter, reporter.clone());
    let chosen = dir.path().join("anim");

    let outcome = orchestrator
        .export(&images, &ExportOptions::default(), &chosen.to_string_lossy())
        .unwrap();

    let expected = dir.path().join("anim.gif");
    assert_eq!(outcome, ExportOutcome::Written(expected.clone()));
    assert!(expected.exists());
    assert!(!reporter
        .messages()
        .iter()
        .any(|m| matches!(m, WorkerMessage::Error { .. })));
}

#[cfg(unix)]
#[test]
fn tool_pipeline_optimizer_failure_keeps_converted_file() {
    let (dir, images) = import_fixtures(3);
    let reporter = ProgressReporter::in_memory();
    let exporter = ToolPipelineExporter::new(fake_tools(dir.path(), 1), reporter.clone());
    let mut orchestrator = ExportOrchestrator::new(exporter, reporter);
    let chosen = dir.path().join("anim.gif");

    let result = orchestrator.export(&images, &ExportOptions::default(), &chosen.to_string_lossy());

    match result {
        Err(ExportError::OptimizationFailed { code, stderr }) => {
            assert_eq!(code, 1);
            assert!(stderr.contains("simulated failure"));
        }
        other => panic!("expected optimization failure, got {:?}", other),
    }
    assert!(chosen.exists());
    assert_eq!(fs::read(&chosen).unwrap(), b"GIF89a");
    assert!(matches!(orchestrator.state(), ExportState::Failed { .. }));
}

#[test]
fn library_backend_encodes_decoded_frames() {
    let dir = tempdir().unwrap();
    let mut paths = write_fixtures(dir.path(), 3);
    paths.push(dir.path().join("missing.png").to_string_lossy().into_owned());

    let mut images = ImageCollection::new();
    let report = images.import(&paths, &DecodingLoader);
    assert_eq!(report.added(), 3);
    assert_eq!(report.failures().count(), 1);

    let reporter = ProgressReporter::in_memory();
    let mut orchestrator =
        ExportOrchestrator::new(FrameEncoderExporter::new(reporter.clone()), reporter);
    let chosen = dir.path().join("out");

    let outcome = orchestrator
        .export(&images, &ExportOptions::default(), &chosen.to_string_lossy())
        .unwrap();

    let expected = dir.path().join("out.gif");
    assert_eq!(outcome, ExportOutcome::Written(expected.clone()));

    let decoded = image::open(&expected).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (10, 10));
}

#[test]
fn deleting_frames_before_export() {
    let (_dir, mut images) = import_fixtures(4);
    let before: Vec<String> = images.sources().map(String::from).collect();

    images.delete(&[3, 1]);

    let after: Vec<&str> = images.sources().collect();
    assert_eq!(after, vec![before[0].as_str(), before[2].as_str()]);
    assert_eq!(images.listing(), &["frame_0.png", "frame_2.png"]);
}
