use image::{DynamicImage, Rgba, RgbaImage};

use super::*;
use crate::config::{BackgroundFit, Resolution, WaveformStyle};
use crate::foundation::color::Rgb8;
use crate::foundation::core::Fps;

fn small_config(style: WaveformStyle) -> RenderConfig {
    RenderConfig {
        style,
        resolution: Resolution::R480,
        color: Rgb8::new(255, 69, 0),
        fps: Fps::new(10, 1).unwrap(),
        bins: 24,
        window_secs: 0.2,
        fit: BackgroundFit::Crop,
    }
}

fn background(side: u32) -> Background {
    let img = RgbaImage::from_pixel(side, side, Rgba([30, 30, 30, 255]));
    Background::from_image(DynamicImage::ImageRgba8(img), side, BackgroundFit::Crop).unwrap()
}

fn tone(secs: f64, sample_rate: u32) -> AudioBuffer {
    let n = (secs * f64::from(sample_rate)).round() as usize;
    let samples = (0..n)
        .map(|i| 0.6 * (i as f32 * 0.05).sin())
        .collect();
    AudioBuffer::new(samples, sample_rate).unwrap()
}

#[test]
fn frame_count_rounds_partial_frames_up() {
    let cfg = small_config(WaveformStyle::Mirror);
    let bg = background(480);

    let exact = tone(2.0, 1_000);
    assert_eq!(Sequencer::new(&exact, &bg, &cfg).unwrap().frame_count(), 20);

    let partial = tone(2.01, 1_000);
    assert_eq!(Sequencer::new(&partial, &bg, &cfg).unwrap().frame_count(), 21);
}

#[test]
fn frames_are_ordered_square_and_complete() {
    let cfg = small_config(WaveformStyle::Line);
    let bg = background(480);
    let audio = tone(1.05, 2_000);

    let frames: Vec<_> = run(&audio, &bg, &cfg)
        .unwrap()
        .collect::<WavegramResult<Vec<_>>>()
        .unwrap();
    assert_eq!(frames.len(), 11);
    for (expected, (idx, frame)) in frames.iter().enumerate() {
        assert_eq!(idx.0, expected as u64);
        assert_eq!((frame.width, frame.height), (480, 480));
        assert_eq!(frame.data.len(), 480 * 480 * 4);
    }
}

#[test]
fn rendering_twice_is_bit_identical() {
    let cfg = small_config(WaveformStyle::Mirror);
    let bg = background(480);
    let audio = tone(0.5, 4_000);
    let seq = Sequencer::new(&audio, &bg, &cfg).unwrap();

    let a: Vec<Frame> = seq.frames().unwrap().map(|r| r.unwrap().1).collect();
    let b: Vec<Frame> = seq.frames().unwrap().map(|r| r.unwrap().1).collect();
    assert_eq!(a.len(), 5);
    assert_eq!(a, b);
}

#[test]
fn window_starts_at_the_frame_time() {
    let cfg = small_config(WaveformStyle::Simple);
    let bg = background(480);
    let mut samples = vec![0.0; 1_000];
    samples[150] = 0.9;
    let audio = AudioBuffer::new(samples, 1_000).unwrap();
    let seq = Sequencer::new(&audio, &bg, &cfg).unwrap();

    // The click at 0.15s falls in the 0.2s windows of frames 0 and 1 only.
    let shows_click = |i| seq.render_frame(FrameIndex(i)).unwrap().data != bg.data();
    assert!(shows_click(0));
    assert!(shows_click(1));
    assert!(!shows_click(2));
}

#[test]
fn last_frame_window_is_zero_padded() {
    let cfg = small_config(WaveformStyle::Simple);
    let bg = background(480);
    // 0.95s => 10 frames, the last starting at 0.9s with a 0.2s window that runs past the end.
    let audio = tone(0.95, 1_000);
    let seq = Sequencer::new(&audio, &bg, &cfg).unwrap();
    assert_eq!(seq.frame_count(), 10);

    let last = seq.render_frame(FrameIndex(9)).unwrap();
    assert_eq!((last.width, last.height), (480, 480));
    assert!(seq.render_frame(FrameIndex(10)).is_err());
}

#[test]
fn iterator_is_lazy_and_reports_remaining_frames() {
    let cfg = small_config(WaveformStyle::Simple);
    let bg = background(480);
    let audio = tone(0.3, 1_000);
    let mut it = Sequencer::new(&audio, &bg, &cfg).unwrap().frames().unwrap();
    assert_eq!(it.size_hint(), (0, Some(3)));
    let (idx, _) = it.next().unwrap().unwrap();
    assert_eq!(idx, FrameIndex(0));
    assert_eq!(it.size_hint(), (0, Some(2)));
    assert_eq!(it.by_ref().count(), 2);
    assert!(it.next().is_none());
}

#[test]
fn new_rejects_mismatched_background_and_bad_config() {
    let cfg = small_config(WaveformStyle::Simple);
    let audio = tone(0.3, 1_000);

    let wrong = background(64);
    assert!(Sequencer::new(&audio, &wrong, &cfg).is_err());

    let bg = background(480);
    let mut bad = cfg.clone();
    bad.bins = 0;
    assert!(Sequencer::new(&audio, &bg, &bad).is_err());
}
