//! 2D canvas rendering
//!
//! Drawing goes through [`Surface`], the handful of 2D-context calls the game
//! needs. On wasm32 it is backed by `CanvasRenderingContext2d`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::sim::{GameState, Player};
use shapes::{draw_circle, draw_grid, draw_label};

/// Drawing primitives of a 2D canvas context
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn set_font(&mut self, font: &str);
    /// Width of `text` in the current font
    fn measure_text(&mut self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn set_stroke_style(&mut self, _style: &str) {}
    fn set_fill_style(&mut self, _style: &str) {}
    fn set_line_width(&mut self, _width: f64) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn stroke(&mut self) {}
    fn arc(&mut self, _x: f64, _y: f64, _radius: f64, _start: f64, _end: f64) {}
    fn fill(&mut self) {}
    fn set_font(&mut self, _font: &str) {}
    fn measure_text(&mut self, _text: &str) -> f64 {
        0.0
    }
    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64, _max_width: f64) {}
}

/// Players smallest first, so bigger ones are drawn on top
///
/// Stable: equal radii keep roster order.
pub fn draw_order(players: &[Player]) -> Vec<&Player> {
    let mut order: Vec<&Player> = players.iter().collect();
    order.sort_by(|a, b| a.radius.total_cmp(&b.radius));
    order
}

/// Draw one frame: grid, food, then players by size
pub fn draw<S: Surface + ?Sized>(state: &GameState, grid_spacing: f32, surface: &mut S) {
    draw_grid(surface, state.width, state.height, grid_spacing);

    for food in &state.foods {
        draw_circle(surface, food.color, food.pos, food.radius);
    }

    for player in draw_order(&state.players) {
        draw_circle(surface, player.color, player.pos, player.radius);
        if let Some(name) = player.name.as_deref() {
            draw_label(surface, name, player.pos, player.radius);
        }
    }
}
