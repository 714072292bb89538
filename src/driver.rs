//! Frame loop driver
//!
//! Owns the game state. Each animation frame computes the time since the
//! previous one, advances the simulation, then draws.

use serde::Serialize;

use crate::input::{InputEvent, apply_input};
use crate::renderer::{Surface, draw};
use crate::settings::Settings;
use crate::sim::{Food, GameEvent, GameState, Player, tick};

/// Lifecycle of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// No state yet; the first frame seeds the arena
    Uninitialized,
    /// Updating and drawing every frame
    Running,
}

/// Serializable view of the arena at one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub seed: u64,
    pub controlled: usize,
    pub players: &'a [Player],
    pub foods: &'a [Food],
}

/// Drives update and draw from host frame callbacks
pub struct Driver {
    settings: Settings,
    seed: u64,
    state: Option<GameState>,
    last_timestamp: Option<f64>,
    frame: u64,
}

impl Driver {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            state: None,
            last_timestamp: None,
            frame: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        if self.state.is_some() {
            LoopPhase::Running
        } else {
            LoopPhase::Uninitialized
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Milliseconds since the previous frame (0 on the first)
    fn elapsed(&mut self, timestamp: f64) -> f32 {
        let elapsed = match self.last_timestamp {
            Some(last) => (timestamp - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        elapsed
    }

    /// Run one frame at host time `timestamp` (ms)
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp: f64, surface: &mut S) -> Vec<GameEvent> {
        let elapsed = self.elapsed(timestamp);
        let (seed, settings) = (self.seed, &self.settings);
        let state = self.state.get_or_insert_with(|| {
            log::info!(
                "Seeding arena {}x{} with {} food and {} players (seed {})",
                settings.arena_width,
                settings.arena_height,
                settings.food_count,
                settings.roster.len(),
                seed
            );
            GameState::new(seed, settings)
        });

        let events = tick(state, elapsed);
        draw(state, self.settings.grid_spacing, surface);
        self.frame += 1;

        events
    }

    /// Apply input between frames; dropped before the first frame
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.state.as_mut() {
            Some(state) => apply_input(state, event),
            None => log::debug!("Input before first frame ignored: {:?}", event),
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        self.state.as_ref().map(|state| Snapshot {
            frame: self.frame,
            seed: state.seed,
            controlled: state.selector.get(),
            players: &state.players,
            foods: &state.foods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullSurface;
    use crate::renderer::testing::{Op, Recorder};

    #[test]
    fn test_first_frame_seeds_and_runs() {
        let mut driver = Driver::new(Settings::default(), 42);
        assert_eq!(driver.phase(), LoopPhase::Uninitialized);
        assert!(driver.state().is_none());

        let mut rec = Recorder::default();
        driver.frame(1000.0, &mut rec);

        assert_eq!(driver.phase(), LoopPhase::Running);
        let state = driver.state().unwrap();
        assert_eq!(state.foods.len(), 50);
        assert_eq!(state.players.len(), 3);
        assert_eq!(rec.ops[0], Op::Clear);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn test_first_frame_does_not_move() {
        let mut driver = Driver::new(Settings::default(), 42);
        let expected = GameState::new(42, &Settings::default());
        driver.frame(123_456.0, &mut NullSurface);
        let state = driver.state().unwrap();
        for (p, q) in state.players.iter().zip(&expected.players) {
            assert_eq!(p.pos, q.pos);
        }
    }

    #[test]
    fn test_elapsed_between_frames() {
        let mut driver = Driver::new(Settings::default(), 1);
        assert_eq!(driver.elapsed(500.0), 0.0);
        assert_eq!(driver.elapsed(516.0), 16.0);
        assert_eq!(driver.elapsed(549.0), 33.0);
        // A long gap (hidden tab) is passed through whole
        assert_eq!(driver.elapsed(10_049.0), 9_500.0);
        // Clock going backwards counts as no time
        assert_eq!(driver.elapsed(9_000.0), 0.0);
    }

    #[test]
    fn test_long_frame_moves_full_distance() {
        let mut driver = Driver::new(Settings::default(), 42);
        driver.frame(0.0, &mut NullSurface);
        let mut player = driver.state().unwrap().players[0].clone();
        // Keep it clear of walls so the step isn't bounced
        player.pos = glam::Vec2::new(400.0, 400.0);
        driver.state.as_mut().unwrap().players[0] = player.clone();
        driver.state.as_mut().unwrap().foods.clear();

        driver.frame(1000.0, &mut NullSurface);

        let moved = crate::distance(player.pos, driver.state().unwrap().players[0].pos);
        // The whole 1000 ms counts: 1000 / (20 + radius)
        let expected = 1000.0 / (20.0 + player.radius);
        assert!((moved - expected).abs() < 1e-3, "moved {moved}, expected {expected}");
    }

    #[test]
    fn test_input_before_first_frame_dropped() {
        let mut driver = Driver::new(Settings::default(), 1);
        driver.handle_input(InputEvent::Key('2'));
        driver.frame(0.0, &mut NullSurface);
        assert_eq!(driver.state().unwrap().selector.get(), 1);

        driver.handle_input(InputEvent::Key('2'));
        assert_eq!(driver.state().unwrap().selector.get(), 2);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Driver::new(Settings::default(), 77);
        let mut b = Driver::new(Settings::default(), 77);
        for i in 0..300 {
            let t = i as f64 * 16.7;
            a.frame(t, &mut NullSurface);
            b.frame(t, &mut NullSurface);
        }
        assert_eq!(a.state().unwrap().players, b.state().unwrap().players);
        assert_eq!(a.state().unwrap().foods, b.state().unwrap().foods);
    }

    #[test]
    fn test_snapshot_json() {
        let mut driver = Driver::new(Settings::default(), 9);
        assert!(driver.snapshot().is_none());
        driver.frame(0.0, &mut NullSurface);

        let json = serde_json::to_value(driver.snapshot().unwrap()).unwrap();
        assert_eq!(json["frame"], 1);
        assert_eq!(json["controlled"], 1);
        assert_eq!(json["players"].as_array().unwrap().len(), 3);
        assert_eq!(json["players"][0]["color"], "#0000ff");
        assert_eq!(json["foods"].as_array().unwrap().len(), 50);
    }
}
