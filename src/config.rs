//! Immutable render configuration, resolved once at startup and passed explicitly to the
//! sequencer, renderer, and compositor.

use std::{fmt, str::FromStr};

use crate::foundation::color::Rgb8;
use crate::foundation::core::Fps;
use crate::foundation::error::{WavegramError, WavegramResult};

/// Output frame rate used by the CLI.
pub const DEFAULT_FPS: Fps = Fps { num: 30, den: 1 };

/// Default waveform color (`#FF4500`).
pub const DEFAULT_COLOR: Rgb8 = Rgb8::new(0xFF, 0x45, 0x00);

/// Default number of waveform bins per frame.
pub const DEFAULT_BINS: u32 = 96;

/// Default audio window length per frame, in seconds.
pub const DEFAULT_WINDOW_SECS: f64 = 0.5;

/// How the waveform is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveformStyle {
    /// Bars standing on the horizontal centre line, growing upward.
    Simple,
    /// Bars extending symmetrically above and below the centre line.
    #[default]
    Mirror,
    /// One connected polyline through the bin centres.
    Line,
}

impl WaveformStyle {
    pub const ALL: [WaveformStyle; 3] = [Self::Simple, Self::Mirror, Self::Line];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Mirror => "mirror",
            Self::Line => "line",
        }
    }
}

impl FromStr for WaveformStyle {
    type Err = WavegramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "mirror" => Ok(Self::Mirror),
            "line" => Ok(Self::Line),
            other => Err(WavegramError::validation(format!(
                "unknown waveform style \"{other}\" (expected simple, mirror, or line)"
            ))),
        }
    }
}

impl fmt::Display for WaveformStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square output resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    R480,
    #[default]
    R720,
    R1080,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Self::R480, Self::R720, Self::R1080];

    /// Edge length in pixels; frames are always `side() x side()`.
    pub fn side(self) -> u32 {
        match self {
            Self::R480 => 480,
            Self::R720 => 720,
            Self::R1080 => 1080,
        }
    }

    pub fn from_side(px: u32) -> WavegramResult<Self> {
        match px {
            480 => Ok(Self::R480),
            720 => Ok(Self::R720),
            1080 => Ok(Self::R1080),
            other => Err(WavegramError::invalid_resolution(format!(
                "{other} (expected 480, 720, or 1080)"
            ))),
        }
    }
}

impl FromStr for Resolution {
    type Err = WavegramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('p').unwrap_or(s);
        let px = s.parse::<u32>().map_err(|_| {
            WavegramError::invalid_resolution(format!("\"{s}\" (expected 480, 720, or 1080)"))
        })?;
        Self::from_side(px)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.side())
    }
}

/// How a non-square or differently sized background is fitted to the output square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackgroundFit {
    /// Centre-crop to a square, then scale.
    #[default]
    Crop,
    /// Scale to the square, ignoring aspect ratio.
    Stretch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub style: WaveformStyle,
    pub resolution: Resolution,
    pub color: Rgb8,
    pub fps: Fps,
    /// Waveform bins drawn per frame (merged further if they exceed the canvas width).
    pub bins: u32,
    /// Length of the audio slice summarised by each frame.
    ///
    /// Frame `i` shows `[i / fps, i / fps + window_secs)`, so the waveform leads playback by
    /// about half a window.
    pub window_secs: f64,
    pub fit: BackgroundFit,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: WaveformStyle::default(),
            resolution: Resolution::default(),
            color: DEFAULT_COLOR,
            fps: DEFAULT_FPS,
            bins: DEFAULT_BINS,
            window_secs: DEFAULT_WINDOW_SECS,
            fit: BackgroundFit::default(),
        }
    }
}

impl RenderConfig {
    pub fn new(style: WaveformStyle, resolution: Resolution, color: Rgb8) -> Self {
        Self {
            style,
            resolution,
            color,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> WavegramResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.bins == 0 {
            return Err(WavegramError::validation("bins must be > 0"));
        }
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(WavegramError::validation(
                "window length must be a positive number of seconds",
            ));
        }
        Ok(())
    }

    /// Output frame edge length in pixels.
    pub fn side(&self) -> u32 {
        self.resolution.side()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
