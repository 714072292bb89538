//! Cell Feast - a canvas cell-eating game
//!
//! Core modules:
//! - `sim`: Simulation (movement, wall bounce, eating, absorption)
//! - `renderer`: 2D canvas drawing behind the `Surface` trait
//! - `input`: Pointer/key events to player steering
//! - `driver`: Frame loop sequencing update then draw
//! - `settings`: Arena and roster configuration
//! - `color`: `#rrggbb` colours and stroke shading

pub mod color;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use driver::{Driver, LoopPhase};
pub use settings::Settings;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Default arena dimensions (logical canvas units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Background grid spacing
    pub const GRID_SPACING: f32 = 20.0;

    /// Food pool size
    pub const FOOD_COUNT: usize = 50;
    pub const FOOD_RADIUS: f32 = 6.0;
    /// Food colour channels are drawn from [min, max)
    pub const FOOD_CHANNEL_MIN: u8 = 50;
    pub const FOOD_CHANNEL_MAX: u8 = 150;

    pub const PLAYER_START_RADIUS: f32 = 15.0;
    /// Radius gained per food eaten
    pub const FOOD_GROWTH: f32 = 1.0;
    /// Added to radius in the speed divisor: bigger players move slower
    pub const SPEED_DIVISOR_BASE: f32 = 20.0;
    /// Displacement is divided by this on a wall bounce
    pub const BOUNCE_DAMPING: f32 = 3.0;
    /// A player must be this much bigger than its prey to absorb it
    pub const ABSORB_MARGIN: f32 = 10.0;

    /// Stroke colour shift applied to fills
    pub const STROKE_SHIFT: i16 = -30;
    pub const GRID_LINE_WIDTH: f64 = 1.0;
    pub const CIRCLE_LINE_WIDTH: f64 = 3.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    let d = p2 - p1;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Direction from `p1` to `p2` in radians, in [-π, π]
#[inline]
pub fn angle_between(p1: Vec2, p2: Vec2) -> f32 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_angle_between_all_quadrants() {
        let origin = Vec2::ZERO;
        assert!(angle_between(origin, Vec2::new(1.0, 0.0)).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(0.0, -1.0)) + FRAC_PI_2).abs() < 1e-6);
        // Left half-plane needs the four-quadrant form
        assert!((angle_between(origin, Vec2::new(-1.0, 0.0)).abs() - PI).abs() < 1e-6);
        let a = angle_between(origin, Vec2::new(-1.0, -1.0));
        assert!((a + 3.0 * PI / 4.0).abs() < 1e-6);
    }
}
