use super::*;

fn px(layer: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [layer[i], layer[i + 1], layer[i + 2], layer[i + 3]]
}

#[test]
fn rejects_zero_and_oversized_targets() {
    assert!(Rasterizer::new(0, 10).is_err());
    assert!(Rasterizer::new(70_000, 10).is_err());
    let r = Rasterizer::new(64, 32).unwrap();
    assert_eq!((r.width(), r.height()), (64, 32));
}

#[test]
fn flat_bars_paint_nothing() {
    let mut r = Rasterizer::new(16, 16).unwrap();
    let g = WaveformGeometry::Simple {
        bars: vec![Rect::new(0.0, 8.0, 16.0, 8.0)],
    };
    assert!(r.draw(&g, Rgb8::new(255, 0, 0)).is_none());
}

#[test]
fn pixel_aligned_bar_is_solid_color() {
    let mut r = Rasterizer::new(16, 16).unwrap();
    let g = WaveformGeometry::Mirror {
        bars: vec![Rect::new(4.0, 4.0, 8.0, 12.0)],
    };
    let layer = r.draw(&g, Rgb8::new(255, 69, 0)).unwrap().to_vec();
    assert_eq!(layer.len(), 16 * 16 * 4);
    assert_eq!(px(&layer, 16, 5, 6), [255, 69, 0, 255]);
    assert_eq!(px(&layer, 16, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&layer, 16, 12, 6), [0, 0, 0, 0]);
}

#[test]
fn layer_is_cleared_between_frames() {
    let mut r = Rasterizer::new(16, 16).unwrap();
    let left = WaveformGeometry::Simple {
        bars: vec![Rect::new(0.0, 0.0, 4.0, 8.0)],
    };
    let right = WaveformGeometry::Simple {
        bars: vec![Rect::new(12.0, 0.0, 16.0, 8.0)],
    };
    r.draw(&left, Rgb8::new(0, 0, 255)).unwrap();
    let layer = r.draw(&right, Rgb8::new(0, 0, 255)).unwrap().to_vec();
    assert_eq!(px(&layer, 16, 1, 2)[3], 0);
    assert_eq!(px(&layer, 16, 13, 2), [0, 0, 255, 255]);
}

#[test]
fn line_strokes_through_its_vertices() {
    let mut r = Rasterizer::new(32, 32).unwrap();
    let g = WaveformGeometry::Line {
        points: vec![Point::new(0.0, 16.0), Point::new(32.0, 16.0)],
        stroke_width: 4.0,
    };
    let layer = r.draw(&g, Rgb8::new(10, 200, 30)).unwrap().to_vec();
    assert_eq!(px(&layer, 32, 16, 15), [10, 200, 30, 255]);
    assert_eq!(px(&layer, 32, 16, 2)[3], 0);

    let single = WaveformGeometry::Line {
        points: vec![Point::new(3.0, 3.0)],
        stroke_width: 4.0,
    };
    assert!(r.draw(&single, Rgb8::new(1, 2, 3)).is_none());
}

#[test]
fn one_bin_line_is_still_drawn() {
    let window = crate::audio::buffer::WindowSample {
        start: 0,
        samples: vec![-0.5; 64],
    };
    let g = crate::render::waveform::render(&window, crate::config::WaveformStyle::Line, 32, 32, 1)
        .unwrap();
    let mut r = Rasterizer::new(32, 32).unwrap();
    let layer = r.draw(&g, Rgb8::new(10, 200, 30)).unwrap().to_vec();
    // -0.5 sits a quarter of the height below the centre.
    assert_eq!(px(&layer, 32, 16, 24), [10, 200, 30, 255]);
    assert_eq!(px(&layer, 32, 16, 4)[3], 0);
}
