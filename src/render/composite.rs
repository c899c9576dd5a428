use std::{path::Path, sync::Arc};

use image::imageops::FilterType;

use crate::config::BackgroundFit;
use crate::foundation::color::Rgb8;
use crate::foundation::error::{WavegramError, WavegramResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u16};
use crate::render::raster::Rasterizer;
use crate::render::waveform::WaveformGeometry;

/// Background image prepared once for the whole render: square, `side x side`, opaque RGBA8.
///
/// Shared read-only across frames; cloning is cheap.
#[derive(Clone, Debug)]
pub struct Background {
    side: u32,
    rgba8: Arc<Vec<u8>>,
}

impl Background {
    /// Decode `path` and fit it to `side x side`.
    #[tracing::instrument]
    pub fn load(path: &Path, side: u32, fit: BackgroundFit) -> WavegramResult<Self> {
        let img = image::ImageReader::open(path)
            .map_err(|e| {
                WavegramError::image_load(format!("failed to open '{}': {e}", path.display()))
            })?
            .with_guessed_format()
            .map_err(|e| {
                WavegramError::image_load(format!("failed to read '{}': {e}", path.display()))
            })?
            .decode()
            .map_err(|e| {
                WavegramError::image_load(format!("failed to decode '{}': {e}", path.display()))
            })?;
        Self::from_image(img, side, fit)
    }

    /// Decode an encoded image (PNG, JPEG, ...) held in memory.
    pub fn from_bytes(bytes: &[u8], side: u32, fit: BackgroundFit) -> WavegramResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| WavegramError::image_load(format!("decode image from memory: {e}")))?;
        Self::from_image(img, side, fit)
    }

    pub fn from_image(
        img: image::DynamicImage,
        side: u32,
        fit: BackgroundFit,
    ) -> WavegramResult<Self> {
        if img.width() == 0 || img.height() == 0 {
            return Err(WavegramError::image_load(format!(
                "background has zero-area dimensions {}x{}",
                img.width(),
                img.height()
            )));
        }
        if side == 0 {
            return Err(WavegramError::validation("output side must be non-zero"));
        }

        let (src_w, src_h) = (img.width(), img.height());
        let fitted = if src_w == side && src_h == side {
            img
        } else {
            match fit {
                BackgroundFit::Crop => img.resize_to_fill(side, side, FilterType::Lanczos3),
                BackgroundFit::Stretch => img.resize_exact(side, side, FilterType::Lanczos3),
            }
        };

        let mut rgba8 = fitted.to_rgba8().into_raw();
        flatten_over_black_in_place(&mut rgba8);

        tracing::info!(src_w, src_h, side, ?fit, "background prepared");
        Ok(Self {
            side,
            rgba8: Arc::new(rgba8),
        })
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Opaque RGBA8 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.rgba8
    }
}

/// One output video frame: opaque RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn save_png(&self, path: &Path) -> WavegramResult<()> {
        use anyhow::Context as _;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Paints waveform geometry over fresh copies of the background.
pub struct Compositor {
    raster: Rasterizer,
}

impl Compositor {
    pub fn new(side: u32) -> WavegramResult<Self> {
        Ok(Self {
            raster: Rasterizer::new(side, side)?,
        })
    }

    pub fn composite(
        &mut self,
        background: &Background,
        geometry: &WaveformGeometry,
        color: Rgb8,
    ) -> WavegramResult<Frame> {
        if background.side() != self.raster.width() {
            return Err(WavegramError::validation(format!(
                "background is {0}x{0} but compositor targets {1}x{1}",
                background.side(),
                self.raster.width()
            )));
        }

        let mut data = background.data().to_vec();
        if let Some(layer) = self.raster.draw(geometry, color) {
            over_in_place(&mut data, layer)?;
        }

        Ok(Frame {
            width: background.side(),
            height: background.side(),
            data,
        })
    }
}

/// One-shot convenience wrapper around [`Compositor::composite`].
pub fn composite(
    background: &Background,
    geometry: &WaveformGeometry,
    color: Rgb8,
) -> WavegramResult<Frame> {
    Compositor::new(background.side())?.composite(background, geometry, color)
}

/// Source-over blend of a premultiplied RGBA8 layer onto `dst`.
fn over_in_place(dst: &mut [u8], src_premul: &[u8]) -> WavegramResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(WavegramError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - sa;
        for i in 0..3 {
            d[i] = add_sat_u8(u16::from(s[i]), mul_div255_u16(u16::from(d[i]), inv));
        }
        d[3] = add_sat_u8(sa, mul_div255_u16(u16::from(d[3]), inv));
    }
    Ok(())
}

fn flatten_over_black_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        px[0] = mul_div255_u16(u16::from(px[0]), a) as u8;
        px[1] = mul_div255_u16(u16::from(px[1]), a) as u8;
        px[2] = mul_div255_u16(u16::from(px[2]), a) as u8;
        px[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
