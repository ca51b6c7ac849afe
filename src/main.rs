//! GifStitch Worker - CLI animated GIF assembler
//!
//! The worker receives a job either as a JSON file via --config or as
//! command-line flags, imports the listed images in order and writes a
//! looping GIF. Progress is reported via JSON messages on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use gifstitch_worker::dependency_locator::DependencyLocator;
use gifstitch_worker::export::{resolve_output_path, ExportOrchestrator, ExportOutcome, Exporter};
use gifstitch_worker::frame_encoder::FrameEncoderExporter;
use gifstitch_worker::image_collection::{DecodingLoader, ImageCollection, ImageLoader, PathLoader};
use gifstitch_worker::models::{
    DisposalMode, ExportBackend, ExportJob, ExportOptions, FrameRate, LogLevel, OptimizationLevel,
    ScalePercent,
};
use gifstitch_worker::pipeline_executor::ToolPipelineExporter;
use gifstitch_worker::progress_reporter::ProgressReporter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "gifstitch-worker")]
#[command(about = "Assemble still images into an animated GIF")]
#[command(version)]
struct Args {
    /// Path to an export job JSON file
    #[arg(long, conflicts_with = "inputs")]
    config: Option<PathBuf>,

    /// Input images, in frame order
    inputs: Vec<String>,

    /// Output path; ".gif" is appended when missing
    #[arg(short, long, default_value = "")]
    output: String,

    /// Frames per second (24-30)
    #[arg(long, default_value = "24", value_parser = parse_frame_rate)]
    fps: FrameRate,

    /// Disposal mode: 0 none, 1 keep, 2 background, 3 previous
    #[arg(long, default_value = "2", value_parser = parse_disposal)]
    disposal: DisposalMode,

    /// gifsicle optimization level (1-3)
    #[arg(long, default_value = "1", value_parser = parse_optimization)]
    optimization: OptimizationLevel,

    /// Output scale in percent (1-200)
    #[arg(long, default_value = "100", value_parser = parse_scale)]
    scale: ScalePercent,

    /// Keep alpha when encoding in-process
    #[arg(long)]
    transparency: bool,

    #[arg(long, value_enum, default_value_t = BackendArg::Tool)]
    backend: BackendArg,

    /// Delete the entry at this listing index after import (repeatable)
    #[arg(long = "remove", value_name = "INDEX")]
    remove: Vec<usize>,

    /// Use this convert executable instead of the platform default
    #[arg(long)]
    convert_path: Option<PathBuf>,

    /// Use this gifsicle executable instead of the platform default
    #[arg(long)]
    optimizer_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Tool,
    Library,
}

impl From<BackendArg> for ExportBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Tool => ExportBackend::Tool,
            BackendArg::Library => ExportBackend::Library,
        }
    }
}

fn parse_frame_rate(s: &str) -> Result<FrameRate, String> {
    let fps: u32 = s.parse().map_err(|e| format!("{}", e))?;
    FrameRate::try_from(fps).map_err(|e| e.to_string())
}

fn parse_disposal(s: &str) -> Result<DisposalMode, String> {
    let code: u8 = s.parse().map_err(|e| format!("{}", e))?;
    DisposalMode::try_from(code).map_err(|e| e.to_string())
}

fn parse_optimization(s: &str) -> Result<OptimizationLevel, String> {
    let level: u8 = s.parse().map_err(|e| format!("{}", e))?;
    OptimizationLevel::try_from(level).map_err(|e| e.to_string())
}

fn parse_scale(s: &str) -> Result<ScalePercent, String> {
    let percent: u32 = s.parse().map_err(|e| format!("{}", e))?;
    ScalePercent::try_from(percent).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let reporter = ProgressReporter::new();

    let job = match load_job(&args) {
        Ok(job) => job,
        Err(e) => {
            reporter.send_error(&format!("{:#}", e));
            reporter.send_complete(false, None, None);
            return ExitCode::from(1);
        }
    };

    match run_worker(&job, &reporter) {
        Ok(ExportOutcome::Written(path)) => {
            reporter.send_log(LogLevel::Info, "Export complete!");
            reporter.send_complete(true, Some(path.to_string_lossy().as_ref()), Some(job.id));
            ExitCode::SUCCESS
        }
        Ok(ExportOutcome::Cancelled) => {
            reporter.send_complete(false, None, Some(job.id));
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.send_error(&format!("{:#}", e));
            reporter.send_complete(false, None, Some(job.id));
            ExitCode::from(1)
        }
    }
}

/// Build the job from --config or from the flags.
fn load_job(args: &Args) -> Result<ExportJob> {
    let mut job = match &args.config {
        Some(config) => {
            let content = std::fs::read_to_string(config)
                .with_context(|| format!("Failed to read config file: {:?}", config))?;
            serde_json::from_str::<ExportJob>(&content)
                .with_context(|| "Failed to parse job configuration")?
        }
        None => {
            let mut job = ExportJob::new(args.inputs.clone(), args.output.clone());
            job.options = ExportOptions {
                frame_rate: args.fps,
                disposal: args.disposal,
                optimization: args.optimization,
                scale: args.scale,
                transparency: args.transparency,
            };
            job.backend = args.backend.into();
            job.remove_indices = args.remove.clone();
            job
        }
    };

    if let Some(path) = &args.convert_path {
        job.tools.convert = Some(path.clone());
    }
    if let Some(path) = &args.optimizer_path {
        job.tools.optimizer = Some(path.clone());
    }

    Ok(job)
}

fn run_worker(job: &ExportJob, reporter: &ProgressReporter) -> Result<ExportOutcome> {
    if resolve_output_path(&job.output_path).is_none() {
        reporter.send_log(LogLevel::Info, "No output path chosen, export skipped");
        return Ok(ExportOutcome::Cancelled);
    }

    reporter.send_log(
        LogLevel::Debug,
        &format!(
            "backend={}, fps={}, disposal={}, optimization={}, scale={}",
            job.backend.as_str(),
            job.options.frame_rate.get(),
            job.options.disposal.label(),
            job.options.optimization.label(),
            job.options.scale.get()
        ),
    );

    // Import
    let loader: &dyn ImageLoader = match job.backend {
        ExportBackend::Tool => &PathLoader,
        ExportBackend::Library => &DecodingLoader,
    };
    let mut images = ImageCollection::new();
    let report = images.import(&job.inputs, loader);
    for (path, err) in report.failures() {
        reporter.send_log(LogLevel::Warning, &format!("Skipped {}: {}", path, err));
    }
    reporter.send_import(&report);

    if !job.remove_indices.is_empty() {
        let removed = images.delete(&job.remove_indices);
        reporter.send_log(LogLevel::Info, &format!("Removed {} images", removed));
    }

    // Export
    let exporter: Box<dyn Exporter> = match job.backend {
        ExportBackend::Tool => {
            let tools = DependencyLocator::new()?
                .resolve(&job.tools)
                .context("Failed to locate export tools")?;
            reporter.send_log(
                LogLevel::Debug,
                &format!("convert: {:?}, gifsicle: {:?}", tools.convert, tools.optimizer),
            );
            Box::new(ToolPipelineExporter::new(tools, reporter.clone()))
        }
        ExportBackend::Library => Box::new(FrameEncoderExporter::new(reporter.clone())),
    };

    let mut orchestrator = ExportOrchestrator::new(exporter, reporter.clone());
    let outcome = orchestrator.export(&images, &job.options, &job.output_path)?;
    orchestrator.acknowledge();

    Ok(outcome)
}
