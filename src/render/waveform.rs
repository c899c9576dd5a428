//! Waveform renderer: turns one frame's audio window into drawable geometry.
//!
//! The window is reduced to a fixed number of bins first, so the visual density does not depend
//! on the sample rate or window length. Each bin keeps the *signed peak* of its samples (the
//! sample with the largest magnitude). Amplitudes are scaled against full scale (1.0), never
//! against the window's own maximum, so quiet passages stay quiet and silence stays flat.

use crate::audio::buffer::WindowSample;
use crate::config::WaveformStyle;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{WavegramError, WavegramResult};

/// Minimum line stroke width in pixels.
pub const MIN_STROKE_WIDTH: f64 = 2.0;

/// Upper bound on bins merged into one pixel column; larger requests are capped before binning.
pub const MAX_BINS_PER_COLUMN: u32 = 4;

/// Style-tagged shapes for one frame, in canvas pixel coordinates (y grows downward).
#[derive(Clone, Debug, PartialEq)]
pub enum WaveformGeometry {
    /// Bars standing on the centre line.
    Simple { bars: Vec<Rect> },
    /// Bars mirrored about the centre line.
    Mirror { bars: Vec<Rect> },
    /// One polyline through the bin centres.
    Line {
        points: Vec<Point>,
        stroke_width: f64,
    },
}

impl WaveformGeometry {
    pub fn style(&self) -> WaveformStyle {
        match self {
            Self::Simple { .. } => WaveformStyle::Simple,
            Self::Mirror { .. } => WaveformStyle::Mirror,
            Self::Line { .. } => WaveformStyle::Line,
        }
    }

    /// Bars for the bar styles, empty for `Line`.
    pub fn bars(&self) -> &[Rect] {
        match self {
            Self::Simple { bars } | Self::Mirror { bars } => bars,
            Self::Line { .. } => &[],
        }
    }

    /// Polyline vertices for `Line`, empty for the bar styles.
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Line { points, .. } => points,
            Self::Simple { .. } | Self::Mirror { .. } => &[],
        }
    }

    /// Number of drawn bars or line vertices.
    pub fn len(&self) -> usize {
        self.bars().len().max(self.points().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render `window` as `style` geometry on a `canvas_width x canvas_height` canvas.
///
/// `bins` is the requested bin count; it is reduced to `canvas_width` when larger so that no bar
/// is narrower than one pixel. At most `canvas_width * MAX_BINS_PER_COLUMN` bins are computed.
pub fn render(
    window: &WindowSample,
    style: WaveformStyle,
    canvas_width: u32,
    canvas_height: u32,
    bins: u32,
) -> WavegramResult<WaveformGeometry> {
    if canvas_width == 0 || canvas_height == 0 {
        return Err(WavegramError::validation(
            "waveform canvas width/height must be non-zero",
        ));
    }
    if bins == 0 {
        return Err(WavegramError::validation("waveform bin count must be > 0"));
    }

    let bins = bins.min(canvas_width.saturating_mul(MAX_BINS_PER_COLUMN));
    let peaks = bin_peaks(&window.samples, bins as usize);
    let peaks = fit_bins(peaks, canvas_width as usize);
    let edges = column_edges(peaks.len(), canvas_width);

    let half_h = f64::from(canvas_height) / 2.0;
    let center_y = half_h;
    let extent = |v: f32| f64::from(v.clamp(-1.0, 1.0)) * half_h;

    let geometry = match style {
        WaveformStyle::Simple => WaveformGeometry::Simple {
            bars: peaks
                .iter()
                .zip(edges.windows(2))
                .map(|(&v, x)| Rect::new(x[0], center_y - extent(v).abs(), x[1], center_y))
                .collect(),
        },
        WaveformStyle::Mirror => WaveformGeometry::Mirror {
            bars: peaks
                .iter()
                .zip(edges.windows(2))
                .map(|(&v, x)| {
                    let e = extent(v).abs();
                    Rect::new(x[0], center_y - e, x[1], center_y + e)
                })
                .collect(),
        },
        WaveformStyle::Line => WaveformGeometry::Line {
            points: match peaks.as_slice() {
                // A single bin spans the whole width as a flat segment.
                [v] => vec![
                    Point::new(edges[0], center_y - extent(*v)),
                    Point::new(edges[1], center_y - extent(*v)),
                ],
                _ => peaks
                    .iter()
                    .zip(edges.windows(2))
                    .map(|(&v, x)| Point::new((x[0] + x[1]) / 2.0, center_y - extent(v)))
                    .collect(),
            },
            stroke_width: (f64::from(canvas_height) / 180.0).max(MIN_STROKE_WIDTH),
        },
    };

    Ok(geometry)
}

/// Reduce `samples` to `bins` signed peaks.
///
/// Bin `k` covers samples `[k*n/bins, (k+1)*n/bins)`. When there are fewer samples than bins,
/// empty bins reuse the nearest sample; an empty window yields silence.
pub fn bin_peaks(samples: &[f32], bins: usize) -> Vec<f32> {
    let n = samples.len();
    if n == 0 {
        return vec![0.0; bins];
    }

    (0..bins)
        .map(|k| {
            let start = (k * n / bins).min(n - 1);
            let end = ((k + 1) * n / bins).clamp(start + 1, n);
            signed_peak(&samples[start..end])
        })
        .collect()
}

/// Merge bins down to at most `max_bins` by averaging magnitudes.
///
/// A merged bin takes the mean magnitude of its members and the sign of its loudest member.
pub fn fit_bins(values: Vec<f32>, max_bins: usize) -> Vec<f32> {
    let n = values.len();
    if max_bins == 0 || n <= max_bins {
        return values;
    }

    (0..max_bins)
        .map(|j| {
            let group = &values[j * n / max_bins..(j + 1) * n / max_bins];
            let mean = group.iter().map(|v| v.abs()).sum::<f32>() / group.len() as f32;
            mean.copysign(signed_peak(group))
        })
        .collect()
}

/// Pixel x boundaries of `n` contiguous columns spanning `[0, width]`.
pub fn column_edges(n: usize, width: u32) -> Vec<f64> {
    let w = f64::from(width);
    if n == 0 {
        return vec![0.0];
    }
    (0..=n)
        .map(|k| (k as f64 * w / n as f64).round())
        .collect()
}

fn signed_peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .copied()
        .fold(0.0f32, |best, s| if s.abs() > best.abs() { s } else { best })
}

#[cfg(test)]
#[path = "../../tests/unit/render/waveform.rs"]
mod tests;
