//! Export settings chosen in the front-end.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Frames per second, restricted to the values offered by the frame rate picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FrameRate(u32);

impl FrameRate {
    pub const MIN: u32 = 24;
    pub const MAX: u32 = 30;

    pub fn get(self) -> u32 {
        self.0
    }

    /// All selectable frame rates, in picker order.
    pub fn choices() -> impl Iterator<Item = FrameRate> {
        (Self::MIN..=Self::MAX).map(FrameRate)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(Self::MIN)
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = ConfigError;

    fn try_from(fps: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&fps) {
            Ok(FrameRate(fps))
        } else {
            Err(ConfigError::FrameRate(fps))
        }
    }
}

impl From<FrameRate> for u32 {
    fn from(fps: FrameRate) -> Self {
        fps.0
    }
}

/// GIF frame disposal directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DisposalMode {
    NoneSpecified,
    DoNotDispose,
    #[default]
    RestoreBackground,
    RestorePrevious,
}

impl DisposalMode {
    pub const ALL: [DisposalMode; 4] = [
        DisposalMode::NoneSpecified,
        DisposalMode::DoNotDispose,
        DisposalMode::RestoreBackground,
        DisposalMode::RestorePrevious,
    ];

    /// Label as shown in the disposal picker.
    pub fn label(&self) -> &'static str {
        match self {
            DisposalMode::NoneSpecified => "0: None Specified",
            DisposalMode::DoNotDispose => "1: Do not dispose",
            DisposalMode::RestoreBackground => "2: Restore to background color",
            DisposalMode::RestorePrevious => "3: Restore to previous content",
        }
    }
}

impl TryFrom<u8> for DisposalMode {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        DisposalMode::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ConfigError::Disposal(code))
    }
}

/// gifsicle optimization aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptimizationLevel {
    #[default]
    #[serde(rename = "O1")]
    StoreChanges,
    #[serde(rename = "O2")]
    ShrinkTransparency,
    #[serde(rename = "O3")]
    Excessive,
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 3] = [
        OptimizationLevel::StoreChanges,
        OptimizationLevel::ShrinkTransparency,
        OptimizationLevel::Excessive,
    ];

    /// Label as shown in the optimisation picker.
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationLevel::StoreChanges => "O1: Store Changes",
            OptimizationLevel::ShrinkTransparency => "O2: Shrink using transparency",
            OptimizationLevel::Excessive => "O3: Excessive",
        }
    }
}

impl TryFrom<u8> for OptimizationLevel {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1..=3 => Ok(OptimizationLevel::ALL[usize::from(level - 1)]),
            _ => Err(ConfigError::Optimization(level)),
        }
    }
}

/// Output scale as a whole percentage (1-200).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScalePercent(u32);

impl ScalePercent {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 200;
    pub const IDENTITY: ScalePercent = ScalePercent(100);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Scale as a multiplier, e.g. 50% -> 0.5.
    pub fn factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for ScalePercent {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<u32> for ScalePercent {
    type Error = ConfigError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&percent) {
            Ok(ScalePercent(percent))
        } else {
            Err(ConfigError::Scale(percent))
        }
    }
}

impl From<ScalePercent> for u32 {
    fn from(scale: ScalePercent) -> Self {
        scale.0
    }
}

/// Snapshot of the export controls, taken when the user presses Save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub frame_rate: FrameRate,

    #[serde(default)]
    pub disposal: DisposalMode,

    /// Tool pipeline only.
    #[serde(default)]
    pub optimization: OptimizationLevel,

    #[serde(default)]
    pub scale: ScalePercent,

    /// Library backend only: keep alpha when quantizing frames.
    #[serde(default)]
    pub transparency: bool,
}
