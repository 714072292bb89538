//! Simulation step
//!
//! Moves every player, bounces them off the arena walls, lets them eat food,
//! then resolves player-vs-player absorption.

use std::f32::consts::{PI, TAU};

use super::state::{Food, GameEvent, GameState, Player};
use crate::consts::*;
use crate::distance;

/// Advance the game by `elapsed_ms` milliseconds
pub fn tick(state: &mut GameState, elapsed_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for i in 0..state.players.len() {
        move_player(&mut state.players[i], state.width, state.height, elapsed_ms);
        eat_food(state, i, &mut events);
    }

    absorb_players(state, &mut events);

    events
}

/// Move along the heading, reflecting off walls
///
/// Speed falls off with size. A player whose edge would cross a wall has its
/// heading reflected and its displacement reversed and damped; this is a soft
/// bounce, so a player may sit slightly past the wall.
pub fn move_player(player: &mut Player, width: f32, height: f32, elapsed_ms: f32) {
    let step = player.velocity() * elapsed_ms / (SPEED_DIVISOR_BASE + player.radius);
    let mut dx = player.angle.cos() * step;
    let mut dy = player.angle.sin() * step;
    let edge = player.radius / 3.0;

    let x = player.pos.x + dx;
    if x + edge > width || x - edge < 0.0 {
        player.angle = PI - player.angle;
        dx = -dx / BOUNCE_DAMPING;
    }

    let y = player.pos.y + dy;
    if y + edge > height || y - edge < 0.0 {
        player.angle = TAU - player.angle;
        dy = -dy / BOUNCE_DAMPING;
    }

    player.pos.x += dx;
    player.pos.y += dy;
}

/// Whether `player` is close enough to swallow `food`
#[inline]
pub fn can_eat_food(player: &Player, food: &Food) -> bool {
    distance(food.pos, player.pos) < player.radius - food.radius / 3.0
}

/// Whether `eater` is big enough and close enough to absorb `prey`
#[inline]
pub fn can_absorb(eater: &Player, prey: &Player) -> bool {
    distance(eater.pos, prey.pos) < eater.radius - prey.radius / 3.0
        && eater.radius > prey.radius + ABSORB_MARGIN
}

/// Let player `i` eat every food it covers, then refill the pool
///
/// Growth applies as the scan goes, so one bite can bring the next food
/// in reach. Replacements only become edible on the next tick.
fn eat_food(state: &mut GameState, i: usize, events: &mut Vec<GameEvent>) {
    let player = &mut state.players[i];
    let mut eaten = Vec::new();

    for (fi, food) in state.foods.iter().enumerate() {
        if can_eat_food(player, food) {
            player.radius += FOOD_GROWTH;
            eaten.push(fi);
            events.push(GameEvent::FoodEaten {
                player: i,
                radius: player.radius,
            });
        }
    }

    if eaten.is_empty() {
        return;
    }
    log::debug!("Player {} ate {} food (radius {})", i + 1, eaten.len(), player.radius);

    // Ascending indices: remove from the back so earlier ones stay valid
    for &fi in eaten.iter().rev() {
        state.foods.remove(fi);
    }
    for _ in 0..eaten.len() {
        let food = state.random_food();
        state.foods.push(food);
    }
}

/// Resolve absorption for every ordered pair, ascending eater then prey
///
/// Absorbed players are marked and skipped for the rest of the pass, then
/// swept out together. Any absorption hands control back to player 1.
fn absorb_players(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let n = state.players.len();
    let mut removed = vec![false; n];

    for i in 0..n {
        if removed[i] {
            continue;
        }
        for j in 0..n {
            if i == j || removed[j] || !can_absorb(&state.players[i], &state.players[j]) {
                continue;
            }

            let prey_radius = state.players[j].radius;
            let eater = &mut state.players[i];
            eater.radius += prey_radius;
            removed[j] = true;

            log::info!(
                "Player {} absorbed player {} (radius {})",
                i + 1,
                j + 1,
                eater.radius
            );
            events.push(GameEvent::PlayerAbsorbed {
                eater: i,
                victim: j,
                radius: eater.radius,
            });
        }
    }

    if !removed.contains(&true) {
        return;
    }

    let mut flags = removed.iter();
    state.players.retain(|_| !flags.next().copied().unwrap_or(false));
    state.selector.reset();
    state.selector.revalidate(state.players.len());
}
