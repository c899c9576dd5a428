use std::{io::Read, path::Path};

use crate::audio::buffer::AudioBuffer;
use crate::foundation::error::{WavegramError, WavegramResult};

/// Load a WAV file into a mono [`AudioBuffer`] at its native sample rate.
///
/// Integer PCM is normalised by `2^(bits-1)`; multi-channel audio is down-mixed by averaging.
#[tracing::instrument]
pub fn load(path: &Path) -> WavegramResult<AudioBuffer> {
    let reader = hound::WavReader::open(path).map_err(|e| {
        WavegramError::unreadable_audio(format!("failed to open '{}': {e}", path.display()))
    })?;
    let buf = decode_wav(reader).map_err(|e| match e {
        WavegramError::UnreadableAudio(msg) => {
            WavegramError::unreadable_audio(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;

    tracing::info!(
        samples = buf.len(),
        sample_rate = buf.sample_rate(),
        duration_secs = buf.duration_secs(),
        "audio loaded"
    );
    Ok(buf)
}

/// Decode WAV bytes from any reader (used by [`load`] and tests).
pub fn decode_wav<R: Read>(mut reader: hound::WavReader<R>) -> WavegramResult<AudioBuffer> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(WavegramError::unreadable_audio("wav header reports zero channels"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(WavegramError::unreadable_audio(format!(
                    "unsupported float bit depth {}",
                    spec.bits_per_sample
                )));
            }
            reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| WavegramError::unreadable_audio(format!("corrupt samples: {e}")))?
        }
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(WavegramError::unreadable_audio(format!(
                    "unsupported integer bit depth {}",
                    spec.bits_per_sample
                )));
            }
            let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / full_scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| WavegramError::unreadable_audio(format!("corrupt samples: {e}")))?
        }
    };

    let mono = downmix_to_mono(&interleaved, spec.channels);
    if mono.is_empty() {
        return Err(WavegramError::unreadable_audio("audio contains no samples"));
    }

    AudioBuffer::new(mono, spec.sample_rate)
}

/// Average interleaved frames into one channel. A trailing partial frame is dropped.
pub fn downmix_to_mono(interleaved: &[f32], channels: u16) -> Vec<f32> {
    let ch = usize::from(channels.max(1));
    if ch == 1 {
        return interleaved.iter().map(|s| s.clamp(-1.0, 1.0)).collect();
    }
    interleaved
        .chunks_exact(ch)
        .map(|frame| (frame.iter().sum::<f32>() / ch as f32).clamp(-1.0, 1.0))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/audio/decode.rs"]
mod tests;
