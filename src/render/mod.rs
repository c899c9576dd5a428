//! Waveform rendering and frame compositing.

pub mod composite;
pub mod raster;
pub mod waveform;
