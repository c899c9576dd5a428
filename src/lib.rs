//! Wavegram renders audiogram videos: an animated waveform painted over a still background image,
//! synchronised with the source audio.
//!
//! - Load audio with [`audio::decode::load`] and a [`Background`]
//! - Build a [`Sequencer`] from an immutable [`RenderConfig`]
//! - Stream its frames into a [`FrameSink`] (e.g. [`FfmpegSink`]), or call [`render_video`]
#![forbid(unsafe_code)]

pub mod audio;
pub mod config;
pub mod encode;
mod foundation;
pub mod pipeline;
pub mod render;
pub mod sequence;

pub use crate::foundation::color::Rgb8;
pub use crate::foundation::core::{Fps, FrameIndex, Point, Rect};
pub use crate::foundation::error::{WavegramError, WavegramResult};

pub use crate::audio::buffer::{AudioBuffer, WindowSample};
pub use crate::config::{BackgroundFit, RenderConfig, Resolution, WaveformStyle};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{RenderStats, VideoOpts, render_still, render_to_sink, render_video};
pub use crate::render::composite::{Background, Compositor, Frame, composite};
pub use crate::render::waveform::{WaveformGeometry, render};
pub use crate::sequence::{FrameSequence, Sequencer, run};
