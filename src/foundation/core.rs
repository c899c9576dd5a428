use crate::foundation::error::{WavegramError, WavegramResult};

pub use kurbo::{Point, Rect};

/// Absolute 0-based output video frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> WavegramResult<Self> {
        if den == 0 {
            return Err(WavegramError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WavegramError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timeline start of frame `idx` in seconds.
    pub fn frame_start_secs(self, idx: FrameIndex) -> f64 {
        (idx.0 as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to a frame index using floor semantics.
    pub fn secs_to_frame_floor(self, secs: f64) -> FrameIndex {
        FrameIndex((secs * self.as_f64()).floor().max(0.0) as u64)
    }

    /// Number of frames needed to cover `samples` audio samples at `sample_rate`.
    ///
    /// Computes `ceil(samples / sample_rate * fps)` in integer space so that exact multiples of
    /// the frame duration never pick up a spurious extra frame.
    pub fn frames_covering(self, samples: u64, sample_rate: u32) -> u64 {
        if sample_rate == 0 {
            return 0;
        }
        let num = u128::from(samples) * u128::from(self.num);
        let den = u128::from(sample_rate) * u128::from(self.den);
        num.div_ceil(den) as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
