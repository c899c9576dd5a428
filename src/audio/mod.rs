//! Audio sampler: WAV decoding and per-frame windowing.

pub mod buffer;
pub mod decode;
