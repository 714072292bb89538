//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a seed replays the same arena
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Food, GameEvent, GameState, Player, Selector};
pub use tick::{can_absorb, can_eat_food, move_player, tick};
