//! Drawing helpers for the grid, circles and labels

use std::f64::consts::TAU;

use glam::Vec2;

use super::Surface;
use crate::color::Color;
use crate::consts::{CIRCLE_LINE_WIDTH, GRID_LINE_WIDTH, STROKE_SHIFT};

/// Font size step used when fitting labels
pub const FONT_STEP: u32 = 2;
/// Fitting stops here even if the text is still narrow
pub const MAX_FONT_SIZE: u32 = 256;
/// Labels fill up to this fraction of the diameter-ish width (1.5 × radius)
pub const LABEL_WIDTH_RATIO: f32 = 1.5;
pub const FONT_FAMILY: &str = "arial";

fn font(size: u32) -> String {
    format!("{size}px {FONT_FAMILY}")
}

/// Clear the surface and stroke a square grid over it
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, width: f32, height: f32, spacing: f32) {
    let (width, height, spacing) = (width as f64, height as f64, spacing as f64);

    surface.clear_rect(0.0, 0.0, width, height);
    surface.set_stroke_style(&Color::BLACK.to_hex());
    surface.set_line_width(GRID_LINE_WIDTH);

    let mut y = 0.0;
    while y < height {
        surface.begin_path();
        surface.move_to(0.0, y);
        surface.line_to(width, y);
        surface.stroke();
        y += spacing;
    }

    let mut x = 0.0;
    while x < width {
        surface.begin_path();
        surface.move_to(x, 0.0);
        surface.line_to(x, height);
        surface.stroke();
        x += spacing;
    }
}

/// Filled circle with a darker outline
pub fn draw_circle<S: Surface + ?Sized>(surface: &mut S, color: Color, pos: Vec2, radius: f32) {
    surface.begin_path();
    surface.arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU);
    surface.set_fill_style(&color.to_hex());
    surface.fill();

    surface.set_line_width(CIRCLE_LINE_WIDTH);
    surface.set_stroke_style(&color.shifted(STROKE_SHIFT).to_hex());
    surface.stroke();
}

/// Largest font size whose rendering of `text` stays narrower than `max_width`
///
/// Leaves the surface font unspecified; callers set the returned size.
pub fn fit_font_size<S: Surface + ?Sized>(surface: &mut S, text: &str, max_width: f64) -> u32 {
    let mut size = FONT_STEP;
    while size + FONT_STEP <= MAX_FONT_SIZE {
        let next = size + FONT_STEP;
        surface.set_font(&font(next));
        if surface.measure_text(text) >= max_width {
            break;
        }
        size = next;
    }
    size
}

/// White text fitted and centred inside a circle
pub fn draw_label<S: Surface + ?Sized>(surface: &mut S, text: &str, pos: Vec2, radius: f32) {
    let size = fit_font_size(surface, text, (LABEL_WIDTH_RATIO * radius) as f64);

    surface.set_fill_style(&Color::WHITE.to_hex());
    surface.set_font(&font(size));
    let text_width = surface.measure_text(text);
    // Width of a lowercase glyph stands in for x-height
    let text_height = surface.measure_text("o");

    surface.fill_text(
        text,
        pos.x as f64 - text_width / 2.0,
        pos.y as f64 + text_height / 2.0,
        2.0 * radius as f64,
    );
}
