use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use wavegram::{
    BackgroundFit, RenderConfig, Resolution, Rgb8, VideoOpts, WaveformStyle, config,
};

/// Render an audiogram: an animated waveform over a still image, muxed with the audio.
#[derive(Parser, Debug)]
#[command(name = "wavegram", version)]
struct Cli {
    /// Input audio (WAV).
    #[arg(value_parser = existing_file)]
    audio_file: PathBuf,

    /// Background image (PNG, JPEG, ...).
    #[arg(value_parser = existing_file)]
    image_file: PathBuf,

    /// Waveform style.
    #[arg(long, value_enum, default_value_t = StyleChoice::Mirror)]
    waveform: StyleChoice,

    /// Square output resolution: 480, 720, or 1080.
    #[arg(long, default_value = "720", value_parser = parse_resolution)]
    resolution: Resolution,

    /// Waveform color as hex, e.g. "#FF4500".
    #[arg(long = "waveform-color", default_value = "#FF4500", value_parser = parse_color)]
    waveform_color: Rgb8,

    /// Output MP4 path (requires `ffmpeg` on PATH).
    #[arg(short, long, default_value = "output.mp4")]
    output: PathBuf,

    /// Number of waveform bins per frame.
    #[arg(long, default_value_t = config::DEFAULT_BINS)]
    bins: u32,

    /// Audio window summarised by each frame, in milliseconds.
    #[arg(long = "window-ms", default_value_t = 500)]
    window_ms: u32,

    /// How the background is fitted to the square frame.
    #[arg(long, value_enum, default_value_t = FitChoice::Crop)]
    fit: FitChoice,

    /// Write a single frame as PNG to this path instead of encoding a video.
    #[arg(long)]
    still: Option<PathBuf>,

    /// Timestamp (seconds) of the frame written by `--still`.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// Only log warnings and errors (overridden by RUST_LOG).
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Simple,
    Mirror,
    Line,
}

impl From<StyleChoice> for WaveformStyle {
    fn from(c: StyleChoice) -> Self {
        match c {
            StyleChoice::Simple => WaveformStyle::Simple,
            StyleChoice::Mirror => WaveformStyle::Mirror,
            StyleChoice::Line => WaveformStyle::Line,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    Crop,
    Stretch,
}

impl From<FitChoice> for BackgroundFit {
    fn from(c: FitChoice) -> Self {
        match c {
            FitChoice::Crop => BackgroundFit::Crop,
            FitChoice::Stretch => BackgroundFit::Stretch,
        }
    }
}

impl Cli {
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let cfg = RenderConfig {
            style: self.waveform.into(),
            resolution: self.resolution,
            color: self.waveform_color,
            fps: config::DEFAULT_FPS,
            bins: self.bins,
            window_secs: f64::from(self.window_ms) / 1000.0,
            fit: self.fit.into(),
        };
        cfg.validate().context("invalid render settings")?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let cfg = cli.render_config()?;
    tracing::info!(
        audio = %cli.audio_file.display(),
        image = %cli.image_file.display(),
        style = %cfg.style,
        color = %cfg.color,
        resolution = %cfg.resolution,
        "starting render"
    );

    if let Some(still) = &cli.still {
        wavegram::render_still(&cli.audio_file, &cli.image_file, &cfg, cli.at, still)
            .with_context(|| format!("render still '{}'", still.display()))?;
        eprintln!("wrote {}", still.display());
        return Ok(());
    }

    let opts = VideoOpts {
        out_path: cli.output.clone(),
        overwrite: !cli.no_overwrite,
    };
    wavegram::render_video(&cli.audio_file, &cli.image_file, &cfg, &opts)
        .with_context(|| format!("render video '{}'", cli.output.display()))?;

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if p.is_file() {
        Ok(p)
    } else {
        Err(format!("'{s}' does not exist or is not a file"))
    }
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    s.parse::<Resolution>().map_err(|e| e.to_string())
}

fn parse_color(s: &str) -> Result<Rgb8, String> {
    s.parse::<Rgb8>().map_err(|e| e.to_string())
}
