//! Top-level entry points tying the sampler, sequencer, and encoder bridge together.
//!
//! Every stage fails fast: the first error aborts the run, and the MP4 sink guarantees that no
//! partial output file is left behind.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::audio::{buffer::AudioBuffer, decode};
use crate::config::RenderConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::WavegramResult;
use crate::render::composite::Background;
use crate::sequence::Sequencer;

/// Summary of a completed render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStats {
    pub frames: u64,
    pub audio_duration_secs: f64,
    pub elapsed: Duration,
}

/// Options for [`render_video`].
#[derive(Clone, Debug)]
pub struct VideoOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl VideoOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Load inputs and render the complete audiogram MP4.
#[tracing::instrument(skip(config), fields(style = %config.style, resolution = %config.resolution))]
pub fn render_video(
    audio_path: &Path,
    image_path: &Path,
    config: &RenderConfig,
    opts: &VideoOpts,
) -> WavegramResult<RenderStats> {
    config.validate()?;
    let (audio, background) = load_inputs(audio_path, image_path, config)?;
    let seq = Sequencer::new(&audio, &background, config)?;

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: opts.out_path.clone(),
        overwrite: opts.overwrite,
    });
    let audio_input = AudioInputConfig {
        path: audio_path.to_path_buf(),
    };
    let stats = render_to_sink(&seq, &audio, &mut sink, Some(audio_input))?;

    tracing::info!(
        out = %opts.out_path.display(),
        frames = stats.frames,
        audio_secs = stats.audio_duration_secs,
        elapsed_secs = stats.elapsed.as_secs_f64(),
        "video written"
    );
    Ok(stats)
}

/// Render the frame showing time `at_secs` to a PNG instead of encoding a video.
///
/// Times past the end of the clip select the last frame.
#[tracing::instrument(skip(config))]
pub fn render_still(
    audio_path: &Path,
    image_path: &Path,
    config: &RenderConfig,
    at_secs: f64,
    png_path: &Path,
) -> WavegramResult<FrameIndex> {
    config.validate()?;
    let (audio, background) = load_inputs(audio_path, image_path, config)?;
    let seq = Sequencer::new(&audio, &background, config)?;

    let last = FrameIndex(seq.frame_count().saturating_sub(1));
    let idx = config.fps.secs_to_frame_floor(at_secs).min(last);
    let frame = seq.render_frame(idx)?;

    crate::encode::ffmpeg::ensure_parent_dir(png_path)?;
    frame.save_png(png_path)?;
    tracing::info!(frame = idx.0, out = %png_path.display(), "still written");
    Ok(idx)
}

/// Stream every frame of `seq` into `sink`, in order, one frame at a time.
pub fn render_to_sink(
    seq: &Sequencer<'_>,
    audio: &AudioBuffer,
    sink: &mut dyn FrameSink,
    audio_input: Option<AudioInputConfig>,
) -> WavegramResult<RenderStats> {
    let started = Instant::now();
    let total = seq.frame_count();
    let side = seq.config().side();

    sink.begin(SinkConfig {
        width: side,
        height: side,
        fps: seq.config().fps,
        frame_count: total,
        audio: audio_input,
    })?;

    let progress_every = (total / 10).max(1);
    for item in seq.frames()? {
        let (idx, frame) = item?;
        sink.push_frame(idx, &frame)?;
        if idx.0 % progress_every == 0 {
            tracing::info!(frame = idx.0, total, "rendering");
        }
    }
    sink.end()?;

    Ok(RenderStats {
        frames: total,
        audio_duration_secs: audio.duration_secs(),
        elapsed: started.elapsed(),
    })
}

fn load_inputs(
    audio_path: &Path,
    image_path: &Path,
    config: &RenderConfig,
) -> WavegramResult<(AudioBuffer, Background)> {
    let audio = decode::load(audio_path)?;
    let background = Background::load(image_path, config.side(), config.fit)?;
    Ok((audio, background))
}
