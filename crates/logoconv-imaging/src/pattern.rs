// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in test patterns — synthetic images rendered in memory with the
// `image` and `imageproc` crates. No file I/O.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use logoconv_core::BuiltinPattern;

/// Colour bars along the bottom of the logo, left to right.
const LOGO_BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [0, 0, 0],
];

/// Render a built-in pattern. Output dimensions always equal
/// [`BuiltinPattern::dimensions`].
pub fn render(pattern: BuiltinPattern) -> DynamicImage {
    match pattern {
        BuiltinPattern::Logo => DynamicImage::ImageRgb8(render_logo()),
        BuiltinPattern::Rose => DynamicImage::ImageRgb8(render_rose()),
        BuiltinPattern::Granite => DynamicImage::ImageLuma8(render_granite()),
    }
}

/// 640x480 test card: gradient banner, nested ellipse/disc/star emblem, and a
/// strip of colour bars.
fn render_logo() -> RgbImage {
    let (width, height) = BuiltinPattern::Logo.dimensions();
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    // Banner: dark blue fading to cyan over the first fifth of the card.
    let banner = height / 5;
    for y in 0..banner {
        let t = y as f32 / banner as f32;
        let color = Rgb([0, (64.0 + 191.0 * t) as u8, (128.0 + 127.0 * t) as u8]);
        for x in 0..width {
            img.put_pixel(x, y, color);
        }
    }

    let center = (width as i32 / 2, 260);
    draw_filled_ellipse_mut(&mut img, center, 200, 130, Rgb([88, 40, 160]));
    draw_filled_circle_mut(&mut img, center, 95, Rgb([250, 200, 40]));
    draw_polygon_mut(&mut img, &star(center, 75.0, 30.0), Rgb([200, 20, 40]));

    let bar_width = width / LOGO_BARS.len() as u32;
    let bar_height = height / 8;
    let bar_top = (height - bar_height - 10) as i32;
    for (i, color) in LOGO_BARS.iter().enumerate() {
        let rect = Rect::at(i as i32 * bar_width as i32, bar_top).of_size(bar_width, bar_height);
        draw_filled_rect_mut(&mut img, rect, Rgb(*color));
    }

    img
}

/// Five-pointed star as a closed polygon (first vertex is not repeated).
fn star(center: (i32, i32), outer: f32, inner: f32) -> Vec<Point<i32>> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = std::f32::consts::PI * (i as f32 / 5.0) - std::f32::consts::FRAC_PI_2;
            Point::new(
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 + (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// 70x46 radial swatch: saturated red core shading to green-tinted edges.
fn render_rose() -> RgbImage {
    let (width, height) = BuiltinPattern::Rose.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max = (cx * cx + cy * cy).sqrt();

    ImageBuffer::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let d = (dx * dx + dy * dy).sqrt() / max;
        Rgb([
            (230.0 - 150.0 * d) as u8,
            (30.0 + 110.0 * d) as u8,
            (60.0 + 40.0 * d) as u8,
        ])
    })
}

/// 128x128 speckle. Deterministic per-pixel hash so repeated renders are
/// byte-identical.
fn render_granite() -> GrayImage {
    let (width, height) = BuiltinPattern::Granite.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let mut h = x
            .wrapping_mul(374_761_393)
            .wrapping_add(y.wrapping_mul(668_265_263));
        h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
        h ^= h >> 16;
        Luma([96 + (h % 112) as u8])
    })
}
