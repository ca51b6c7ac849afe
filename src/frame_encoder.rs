//! In-process GIF encoding of decoded frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gif::{DisposalMethod, Encoder, Frame, Repeat};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::error::ExportError;
use crate::export::Exporter;
use crate::image_collection::ImageCollection;
use crate::models::{DisposalMode, ExportOptions, ExportStage, LogLevel, OptimizationLevel};
use crate::option_mapper;
use crate::progress_reporter::ProgressReporter;

/// Quantization speed passed to the gif crate (1 = best, 30 = fastest).
const DEFAULT_SPEED: i32 = 10;

/// Encodes every decoded frame into a looping GIF.
///
/// Frame rate, disposal and scale are applied here. Optimization levels are
/// a gifsicle concept with no equivalent in the encoder and are ignored.
pub struct FrameEncoderExporter {
    reporter: ProgressReporter,
    speed: i32,
}

impl FrameEncoderExporter {
    pub fn new(reporter: ProgressReporter) -> Self {
        Self {
            reporter,
            speed: DEFAULT_SPEED,
        }
    }

    fn prepare_frames(
        &self,
        images: &ImageCollection,
        options: &ExportOptions,
    ) -> Result<Vec<RgbaImage>, ExportError> {
        images
            .images()
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let frame = image.frame().ok_or(ExportError::FrameNotDecoded { index })?;
                let frame = scale_frame(frame, options);
                if frame.width() > u32::from(u16::MAX) || frame.height() > u32::from(u16::MAX) {
                    return Err(ExportError::FrameTooLarge {
                        index,
                        width: frame.width(),
                        height: frame.height(),
                    });
                }
                Ok(frame)
            })
            .collect()
    }

    fn encode_frame(&self, rgba: RgbaImage, options: &ExportOptions) -> Frame<'static> {
        // Dimensions were checked in prepare_frames
        let width = rgba.width() as u16;
        let height = rgba.height() as u16;

        let mut frame = if options.transparency {
            let mut pixels = rgba.into_raw();
            Frame::from_rgba_speed(width, height, &mut pixels, self.speed)
        } else {
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            Frame::from_rgb_speed(width, height, rgb.as_raw(), self.speed)
        };

        frame.delay = option_mapper::frame_delay_hundredths(options.frame_rate);
        frame.dispose = disposal_method(options.disposal);
        frame
    }
}

impl Exporter for FrameEncoderExporter {
    fn export(
        &self,
        images: &ImageCollection,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError> {
        if options.optimization != OptimizationLevel::default() {
            self.reporter.send_log(
                LogLevel::Warning,
                &format!(
                    "Optimization {} only applies to the tool pipeline, ignoring",
                    options.optimization.label()
                ),
            );
        }

        self.reporter.send_stage(ExportStage::Encode);
        let frames = self.prepare_frames(images, options)?;

        // Logical screen large enough for every frame
        let screen_width = frames.iter().map(|f| f.width()).max().unwrap_or(0) as u16;
        let screen_height = frames.iter().map(|f| f.height()).max().unwrap_or(0) as u16;

        let writer = BufWriter::new(File::create(output)?);
        let mut encoder = Encoder::new(writer, screen_width, screen_height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        for (index, rgba) in frames.into_iter().enumerate() {
            let frame = self.encode_frame(rgba, options);
            encoder.write_frame(&frame)?;
            self.reporter
                .send_log(LogLevel::Debug, &format!("Encoded frame {}", index));
        }

        // into_inner writes the trailer
        let mut writer = encoder.into_inner()?;
        std::io::Write::flush(&mut writer)?;
        Ok(())
    }
}

/// GIF disposal method for a disposal mode.
pub fn disposal_method(mode: DisposalMode) -> DisposalMethod {
    match mode {
        DisposalMode::NoneSpecified => DisposalMethod::Any,
        DisposalMode::DoNotDispose => DisposalMethod::Keep,
        DisposalMode::RestoreBackground => DisposalMethod::Background,
        DisposalMode::RestorePrevious => DisposalMethod::Previous,
    }
}

fn scale_frame(frame: &RgbaImage, options: &ExportOptions) -> RgbaImage {
    if options.scale.is_identity() {
        return frame.clone();
    }
    let factor = options.scale.factor();
    let width = ((f64::from(frame.width()) * factor).round() as u32).max(1);
    let height = ((f64::from(frame.height()) * factor).round() as u32).max(1);
    imageops::resize(frame, width, height, FilterType::Triangle)
}
