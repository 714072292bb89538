//! Game state and entity types

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::color::Color;
use crate::consts::*;
use crate::settings::{PlayerSpec, Settings};

/// A food particle. Never changes; eaten food is replaced by a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    pub color: Color,
    pub pos: Vec2,
    pub radius: f32,
}

/// A player-controlled circle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub color: Color,
    pub pos: Vec2,
    /// Only ever grows
    pub radius: f32,
    /// Heading (radians)
    pub angle: f32,
    /// False when told to stop in place
    pub moving: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Player {
    pub fn new(color: Color, pos: Vec2, angle: f32) -> Self {
        Self {
            color,
            pos,
            radius: PLAYER_START_RADIUS,
            angle,
            moving: true,
            name: None,
        }
    }

    /// 1.0 while moving, 0.0 when stopped
    #[inline]
    pub fn velocity(&self) -> f32 {
        if self.moving { 1.0 } else { 0.0 }
    }
}

/// 1-based index of the player receiving input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector(usize);

impl Default for Selector {
    fn default() -> Self {
        Self(1)
    }
}

impl Selector {
    /// 1-based position
    pub fn get(&self) -> usize {
        self.0
    }

    /// Roster index
    pub fn index(&self) -> usize {
        self.0 - 1
    }

    /// Select player `n` (1-based) if it exists in a roster of `roster_len`
    pub fn select(&mut self, n: usize, roster_len: usize) -> bool {
        if (1..=roster_len).contains(&n) {
            self.0 = n;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }

    /// Clamp into a roster that may have shrunk
    pub fn revalidate(&mut self, roster_len: usize) {
        self.0 = self.0.clamp(1, roster_len.max(1));
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Roster index of the eater, radius after eating
    FoodEaten { player: usize, radius: f32 },
    /// Roster indices as of the start of the absorption pass
    PlayerAbsorbed { eater: usize, victim: usize, radius: f32 },
}

/// Complete game state, owned by the loop driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    /// Pool size the food collection is held at
    pub food_count: usize,
    pub foods: Vec<Food>,
    pub players: Vec<Player>,
    pub selector: Selector,
    rng: Pcg32,
}

impl GameState {
    /// Empty arena with no food or players
    pub fn empty(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            width,
            height,
            food_count: 0,
            foods: Vec::new(),
            players: Vec::new(),
            selector: Selector::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fill the food pool and create the starting roster
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::empty(seed, settings.arena_width, settings.arena_height);
        state.food_count = settings.food_count;
        let foods: Vec<Food> = (0..settings.food_count).map(|_| state.random_food()).collect();
        let players: Vec<Player> = settings
            .roster
            .iter()
            .map(|spec| state.random_player(spec))
            .collect();
        state.foods = foods;
        state.players = players;
        state
    }

    /// A food particle at a random whole-unit position
    pub fn random_food(&mut self) -> Food {
        let color = Color::random_food(&mut self.rng);
        Food {
            color,
            pos: self.random_position(),
            radius: FOOD_RADIUS,
        }
    }

    /// A starting-size player at a random position and heading
    pub fn random_player(&mut self, spec: &PlayerSpec) -> Player {
        let pos = self.random_position();
        let angle = self.rng.random_range(0.0..TAU);
        Player {
            name: spec.name.clone(),
            ..Player::new(spec.color, pos, angle)
        }
    }

    fn random_position(&mut self) -> Vec2 {
        let x = self.rng.random_range(0..(self.width as u32).max(1));
        let y = self.rng.random_range(0..(self.height as u32).max(1));
        Vec2::new(x as f32, y as f32)
    }

    /// The player currently receiving input
    pub fn controlled(&self) -> Option<&Player> {
        self.players.get(self.selector.index())
    }

    pub fn controlled_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(self.selector.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_from_defaults() {
        let state = GameState::new(12345, &Settings::default());
        assert_eq!(state.foods.len(), 50);
        assert_eq!(state.players.len(), 3);
        assert_eq!(state.selector.get(), 1);

        for food in &state.foods {
            assert_eq!(food.radius, FOOD_RADIUS);
            assert!((0.0..800.0).contains(&food.pos.x));
            assert!((0.0..800.0).contains(&food.pos.y));
            assert_eq!(food.pos.x.fract(), 0.0);
        }
        for player in &state.players {
            assert_eq!(player.radius, PLAYER_START_RADIUS);
            assert!(player.moving);
            assert!((0.0..TAU).contains(&player.angle));
        }
        assert_eq!(state.players[1].color, Color::RED);
    }

    #[test]
    fn test_same_seed_same_state() {
        let a = GameState::new(99, &Settings::default());
        let b = GameState::new(99, &Settings::default());
        assert_eq!(a.foods, b.foods);
        assert_eq!(a.players, b.players);
    }

    #[test]
    fn test_roster_names_carried() {
        let settings = Settings {
            roster: vec![PlayerSpec::named(Color::RED, "Rex")],
            ..Default::default()
        };
        let state = GameState::new(1, &settings);
        assert_eq!(state.players[0].name.as_deref(), Some("Rex"));
    }

    #[test]
    fn test_selector_bounds() {
        let mut sel = Selector::default();
        assert!(sel.select(3, 3));
        assert_eq!(sel.get(), 3);
        assert_eq!(sel.index(), 2);
        assert!(!sel.select(4, 3));
        assert!(!sel.select(0, 3));
        assert_eq!(sel.get(), 3);

        sel.revalidate(2);
        assert_eq!(sel.get(), 2);
        sel.revalidate(0);
        assert_eq!(sel.get(), 1);

        sel.select(2, 2);
        sel.reset();
        assert_eq!(sel.get(), 1);
    }
}
