//! Translation of export options into tool arguments.
//!
//! Everything here is pure: the same options and paths always produce the
//! same argument vectors.

use std::ffi::OsString;
use std::path::Path;

use crate::models::{DisposalMode, ExportOptions, FrameRate, OptimizationLevel, ScalePercent};

/// Inter-frame delay in milliseconds, truncated.
pub fn frame_delay_ms(fps: FrameRate) -> u32 {
    1000 / fps.get()
}

/// Inter-frame delay in hundredths of a second, as convert and GIF expect.
///
/// Truncates twice (ms, then hundredths), so 24 fps gives 4 and 30 fps gives 3.
pub fn frame_delay_hundredths(fps: FrameRate) -> u16 {
    // 1000 / 24 / 10 is at most 4, always fits
    (frame_delay_ms(fps) / 10) as u16
}

/// Single character disposal code, the first character of the label.
pub fn disposal_code(mode: DisposalMode) -> &'static str {
    &mode.label()[..1]
}

/// Two character optimization code, the first two characters of the label.
pub fn optimization_code(level: OptimizationLevel) -> &'static str {
    &level.label()[..2]
}

/// Scale multiplier with four decimals, or `None` at 100%.
pub fn scale_argument(scale: ScalePercent) -> Option<String> {
    if scale.is_identity() {
        None
    } else {
        Some(format!("{:.4}", scale.factor()))
    }
}

/// Arguments for the convert step.
pub fn convert_args<P: AsRef<Path>>(
    options: &ExportOptions,
    inputs: &[P],
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-delay".into(),
        frame_delay_hundredths(options.frame_rate).to_string().into(),
        "-loop".into(),
        "0".into(),
        "-dispose".into(),
        disposal_code(options.disposal).into(),
    ];
    args.extend(inputs.iter().map(|p| p.as_ref().as_os_str().to_owned()));
    args.push(output.as_os_str().to_owned());
    args
}

/// Arguments for the in-place gifsicle step.
pub fn optimizer_args(options: &ExportOptions, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-b".into(),
        format!("-{}", optimization_code(options.optimization)).into(),
    ];
    if let Some(scale) = scale_argument(options.scale) {
        args.push("--scale".into());
        args.push(scale.into());
    }
    args.push(output.as_os_str().to_owned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps(value: u32) -> FrameRate {
        FrameRate::try_from(value).unwrap()
    }

    #[test]
    fn test_delay_truncates() {
        assert_eq!(frame_delay_hundredths(fps(24)), 4);
        assert_eq!(frame_delay_hundredths(fps(25)), 4);
        assert_eq!(frame_delay_hundredths(fps(30)), 3);
        assert_eq!(frame_delay_ms(fps(24)), 41);
    }

    #[test]
    fn test_delay_total_over_domain() {
        for rate in FrameRate::choices() {
            let delay = frame_delay_hundredths(rate);
            assert!(delay == 3 || delay == 4, "{:?} -> {}", rate, delay);
        }
    }

    #[test]
    fn test_disposal_codes() {
        let codes: Vec<_> = DisposalMode::ALL.iter().map(|m| disposal_code(*m)).collect();
        assert_eq!(codes, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_optimization_codes() {
        let codes: Vec<_> = OptimizationLevel::ALL
            .iter()
            .map(|l| optimization_code(*l))
            .collect();
        assert_eq!(codes, vec!["O1", "O2", "O3"]);
    }

    #[test]
    fn test_scale_argument() {
        assert_eq!(scale_argument(ScalePercent::IDENTITY), None);
        let half = ScalePercent::try_from(50).unwrap();
        assert_eq!(scale_argument(half).as_deref(), Some("0.5000"));
        let max = ScalePercent::try_from(200).unwrap();
        assert_eq!(scale_argument(max).as_deref(), Some("2.0000"));
        let tiny = ScalePercent::try_from(1).unwrap();
        assert_eq!(scale_argument(tiny).as_deref(), Some("0.0100"));
    }

    #[test]
    fn test_convert_args() {
        let options = ExportOptions::default();
        let args = convert_args(&options, &["a.png", "b.png"], Path::new("out.gif"));
        let expected: Vec<OsString> = [
            "-delay", "4", "-loop", "0", "-dispose", "2", "a.png", "b.png", "out.gif",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_optimizer_args_without_scale() {
        let options = ExportOptions::default();
        let args = optimizer_args(&options, Path::new("out.gif"));
        let expected: Vec<OsString> = ["-b", "-O1", "out.gif"].iter().map(OsString::from).collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_optimizer_args_with_scale() {
        let options = ExportOptions {
            optimization: OptimizationLevel::Excessive,
            scale: ScalePercent::try_from(50).unwrap(),
            ..ExportOptions::default()
        };
        let args = optimizer_args(&options, Path::new("out.gif"));
        let expected: Vec<OsString> = ["-b", "-O3", "--scale", "0.5000", "out.gif"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }
}
