use std::io::Cursor;

use super::*;

type TestWriter<'a> = hound::WavWriter<&'a mut Cursor<Vec<u8>>>;

fn wav_bytes(spec: hound::WavSpec, write: impl FnOnce(&mut TestWriter<'_>)) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut w = hound::WavWriter::new(&mut cursor, spec).unwrap();
        write(&mut w);
        w.finalize().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn int16_stereo_is_normalised_and_downmixed() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let bytes = wav_bytes(spec, |w| {
        // frame 0: L=+half, R=+half; frame 1: L=+full-ish, R=-full-ish
        w.write_sample(16_384i16).unwrap();
        w.write_sample(16_384i16).unwrap();
        w.write_sample(i16::MIN).unwrap();
        w.write_sample(i16::MIN).unwrap();
    });

    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let buf = decode_wav(reader).unwrap();
    assert_eq!(buf.sample_rate(), 8_000);
    assert_eq!(buf.len(), 2);
    assert!((buf.samples()[0] - 0.5).abs() < 1e-6);
    assert!((buf.samples()[1] + 1.0).abs() < 1e-6);
}

#[test]
fn float32_mono_passes_through() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let bytes = wav_bytes(spec, |w| {
        for s in [0.0f32, 0.25, -0.75] {
            w.write_sample(s).unwrap();
        }
    });

    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let buf = decode_wav(reader).unwrap();
    assert_eq!(buf.samples(), &[0.0, 0.25, -0.75]);
}

#[test]
fn empty_wav_is_unreadable() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let bytes = wav_bytes(spec, |_| {});
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let err = decode_wav(reader).unwrap_err();
    assert!(matches!(err, WavegramError::UnreadableAudio(_)));
}

#[test]
fn load_reports_missing_and_non_audio_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.wav");
    assert!(matches!(
        load(&missing).unwrap_err(),
        WavegramError::UnreadableAudio(_)
    ));

    let junk = dir.path().join("junk.wav");
    std::fs::write(&junk, b"definitely not a RIFF file").unwrap();
    assert!(matches!(
        load(&junk).unwrap_err(),
        WavegramError::UnreadableAudio(_)
    ));
}

#[test]
fn downmix_averages_frames_and_drops_partial_tail() {
    let mono = downmix_to_mono(&[1.0, 0.0, 0.5, 0.5, 0.9], 2);
    assert_eq!(mono, vec![0.5, 0.5]);

    let passthrough = downmix_to_mono(&[2.0, -0.5], 1);
    assert_eq!(passthrough, vec![1.0, -0.5]);
}
