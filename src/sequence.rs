//! Sequencer: drives window -> waveform -> composite across the audio at a fixed frame rate.
//!
//! Frames are produced lazily, one at a time, in strictly increasing time order. Only the frame
//! currently being handed out is alive, so memory stays bounded regardless of audio length.

use std::iter::FusedIterator;

use crate::audio::buffer::AudioBuffer;
use crate::config::RenderConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WavegramError, WavegramResult};
use crate::render::composite::{Background, Compositor, Frame};
use crate::render::waveform;

/// Borrowed view over everything needed to render the frames of one clip.
#[derive(Clone, Copy, Debug)]
pub struct Sequencer<'a> {
    audio: &'a AudioBuffer,
    background: &'a Background,
    config: &'a RenderConfig,
    frame_count: u64,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        audio: &'a AudioBuffer,
        background: &'a Background,
        config: &'a RenderConfig,
    ) -> WavegramResult<Self> {
        config.validate()?;
        if background.side() != config.side() {
            return Err(WavegramError::validation(format!(
                "background is {0}x{0} but resolution is {1}x{1}",
                background.side(),
                config.side()
            )));
        }

        let frame_count = config
            .fps
            .frames_covering(audio.len() as u64, audio.sample_rate());
        Ok(Self {
            audio,
            background,
            config,
            frame_count,
        })
    }

    /// `ceil(duration_secs * fps)`.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Start a fresh pass over all frames.
    ///
    /// Each call returns an independent iterator starting at frame 0.
    pub fn frames(&self) -> WavegramResult<FrameSequence<'a>> {
        Ok(FrameSequence {
            seq: *self,
            compositor: Compositor::new(self.config.side())?,
            next: 0,
            done: false,
        })
    }

    /// Render a single frame out of sequence (used for still previews).
    pub fn render_frame(&self, idx: FrameIndex) -> WavegramResult<Frame> {
        if idx.0 >= self.frame_count {
            return Err(WavegramError::validation(format!(
                "frame {} is out of range (clip has {} frames)",
                idx.0, self.frame_count
            )));
        }
        let mut compositor = Compositor::new(self.config.side())?;
        self.render_with(&mut compositor, idx)
    }

    fn render_with(&self, compositor: &mut Compositor, idx: FrameIndex) -> WavegramResult<Frame> {
        let cfg = self.config;
        let start_secs = cfg.fps.frame_start_secs(idx);
        let window = self.audio.window(start_secs, cfg.window_secs);
        let geometry = waveform::render(&window, cfg.style, cfg.side(), cfg.side(), cfg.bins)?;
        compositor.composite(self.background, &geometry, cfg.color)
    }
}

/// Lazy, finite, forward-only frame iterator returned by [`Sequencer::frames`].
///
/// Yields `(index, frame)` pairs. After the first error the iterator is exhausted.
pub struct FrameSequence<'a> {
    seq: Sequencer<'a>,
    compositor: Compositor,
    next: u64,
    done: bool,
}

impl Iterator for FrameSequence<'_> {
    type Item = WavegramResult<(FrameIndex, Frame)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next >= self.seq.frame_count {
            return None;
        }

        let idx = FrameIndex(self.next);
        self.next += 1;
        match self.seq.render_with(&mut self.compositor, idx) {
            Ok(frame) => {
                tracing::debug!(frame = idx.0, total = self.seq.frame_count, "frame rendered");
                Some(Ok((idx, frame)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let left = self.seq.frame_count.saturating_sub(self.next);
        (0, usize::try_from(left).ok())
    }
}

impl FusedIterator for FrameSequence<'_> {}

/// Render every frame of `audio` over `background` as configured by `config`.
pub fn run<'a>(
    audio: &'a AudioBuffer,
    background: &'a Background,
    config: &'a RenderConfig,
) -> WavegramResult<FrameSequence<'a>> {
    Sequencer::new(audio, background, config)?.frames()
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
