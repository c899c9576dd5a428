//! Encoder bridge.
//!
//! Sinks consume rendered frames in timeline order; the ffmpeg sink muxes them with the source
//! audio into the final MP4.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
