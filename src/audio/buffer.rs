use std::sync::Arc;

use crate::foundation::error::{WavegramError, WavegramResult};

/// Decoded mono audio, immutable after load.
///
/// Samples are normalised amplitudes in `[-1, 1]` at the source's native sample rate. Cloning is
/// cheap: the sample storage is shared.
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    sample_rate: u32,
    samples: Arc<Vec<f32>>,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> WavegramResult<Self> {
        if sample_rate == 0 {
            return Err(WavegramError::unreadable_audio("sample rate must be non-zero"));
        }
        Ok(Self {
            sample_rate,
            samples: Arc::new(samples),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Sample index for time `t` (seconds): `round(t * sample_rate)`, clamped at zero.
    pub fn index_at(&self, t: f64) -> usize {
        (t * f64::from(self.sample_rate)).round().max(0.0) as usize
    }

    /// Extract the samples covering `[start_secs, start_secs + duration_secs)`.
    ///
    /// The window length is always `round(duration_secs * sample_rate)`. Any part of the range
    /// past the end of the buffer is filled with silence.
    pub fn window(&self, start_secs: f64, duration_secs: f64) -> WindowSample {
        let len = self.index_at(duration_secs);
        let start = self.index_at(start_secs);

        let mut samples = vec![0.0f32; len];
        if start < self.samples.len() {
            let end = start.saturating_add(len).min(self.samples.len());
            samples[..end - start].copy_from_slice(&self.samples[start..end]);
        }

        WindowSample { start, samples }
    }
}

/// Fixed-size slice of amplitudes summarised by one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSample {
    /// Index of the first sample in the source buffer.
    pub start: usize,
    pub samples: Vec<f32>,
}

impl WindowSample {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/buffer.rs"]
mod tests;
