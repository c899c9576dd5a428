use crate::foundation::color::Rgb8;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{WavegramError, WavegramResult};
use crate::render::waveform::WaveformGeometry;

/// CPU rasterizer for waveform geometry, backed by `vello_cpu`.
///
/// Produces a premultiplied RGBA8 layer (transparent where nothing is drawn). The render context
/// and target pixmap are reused across frames.
pub struct Rasterizer {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> WavegramResult<Self> {
        if width == 0 || height == 0 {
            return Err(WavegramError::validation(
                "raster width/height must be non-zero",
            ));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| WavegramError::validation("raster width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| WavegramError::validation("raster height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize `geometry` in `color` at full opacity.
    ///
    /// Returns `None` when the geometry covers no area (e.g. silent bars), in which case the layer
    /// is left untouched and callers can skip blending entirely.
    pub fn draw(&mut self, geometry: &WaveformGeometry, color: Rgb8) -> Option<&[u8]> {
        let painted = match geometry {
            WaveformGeometry::Simple { bars } | WaveformGeometry::Mirror { bars } => {
                bars.iter().any(|b| b.area() > 0.0)
            }
            WaveformGeometry::Line { points, .. } => points.len() >= 2,
        };
        if !painted {
            return None;
        }

        clear_pixmap(&mut self.pixmap);
        self.ctx.reset();
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, 255,
        ));

        match geometry {
            WaveformGeometry::Simple { bars } | WaveformGeometry::Mirror { bars } => {
                for bar in bars.iter().filter(|b| b.area() > 0.0) {
                    self.ctx.fill_rect(&rect_to_cpu(*bar));
                }
            }
            WaveformGeometry::Line {
                points,
                stroke_width,
            } => {
                let mut path = vello_cpu::kurbo::BezPath::new();
                for (i, p) in points.iter().enumerate() {
                    if i == 0 {
                        path.move_to(point_to_cpu(*p));
                    } else {
                        path.line_to(point_to_cpu(*p));
                    }
                }
                self.ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(*stroke_width)
                        .with_caps(vello_cpu::kurbo::Cap::Round)
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                self.ctx.stroke_path(&path);
            }
        }

        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Some(self.pixmap.data_as_u8_slice())
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
