//! Input handling: steering the controlled player and switching control

use glam::Vec2;

use crate::sim::GameState;
use crate::{angle_between, distance};

/// An input event in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click, pointer-down or first touch
    Pointer { x: f32, y: f32 },
    /// Character of a key press
    Key(char),
}

/// Apply one input event to the game
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Pointer { x, y } => steer_toward(state, Vec2::new(x, y)),
        InputEvent::Key(key) => select_player(state, key),
    }
}

/// Head the controlled player toward `target`; a target inside it stops it
pub fn steer_toward(state: &mut GameState, target: Vec2) {
    let Some(player) = state.controlled_mut() else {
        return;
    };

    player.angle = angle_between(player.pos, target);
    player.moving = distance(player.pos, target) >= player.radius;
}

/// Keys 1-9 hand control to that player, if it still exists
pub fn select_player(state: &mut GameState, key: char) {
    let Some(n) = key.to_digit(10).filter(|&d| d >= 1) else {
        return;
    };

    let roster_len = state.players.len();
    if state.selector.select(n as usize, roster_len) {
        log::debug!("Controlling player {}", n);
    } else {
        log::debug!("No player {} to control (roster has {})", n, roster_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn state_with_player_at(x: f32, y: f32) -> GameState {
        let mut state = GameState::new(3, &Settings::default());
        state.players[0].pos = Vec2::new(x, y);
        state
    }

    #[test]
    fn test_pointer_sets_heading() {
        let mut state = state_with_player_at(100.0, 100.0);
        apply_input(&mut state, InputEvent::Pointer { x: 100.0, y: 300.0 });
        assert!((state.players[0].angle - FRAC_PI_2).abs() < 1e-6);
        assert!(state.players[0].moving);

        apply_input(&mut state, InputEvent::Pointer { x: 0.0, y: 100.0 });
        assert!((state.players[0].angle - PI).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_inside_player_stops_it() {
        let mut state = state_with_player_at(100.0, 100.0);
        apply_input(&mut state, InputEvent::Pointer { x: 105.0, y: 104.0 });
        assert!(!state.players[0].moving);

        // Clicking outside gets it going again
        apply_input(&mut state, InputEvent::Pointer { x: 200.0, y: 100.0 });
        assert!(state.players[0].moving);
        assert!(state.players[0].angle.abs() < 1e-6);
    }

    #[test]
    fn test_pointer_steers_only_controlled_player() {
        let mut state = GameState::new(3, &Settings::default());
        let others = (state.players[0].clone(), state.players[2].clone());

        apply_input(&mut state, InputEvent::Key('2'));
        let target = state.players[1].pos + Vec2::new(0.0, -50.0);
        apply_input(&mut state, InputEvent::Pointer { x: target.x, y: target.y });

        assert!((state.players[1].angle + FRAC_PI_2).abs() < 1e-5);
        assert_eq!((state.players[0].clone(), state.players[2].clone()), others);
    }

    #[test]
    fn test_key_selection_bounds() {
        let mut state = GameState::new(3, &Settings::default());
        apply_input(&mut state, InputEvent::Key('3'));
        assert_eq!(state.selector.get(), 3);

        for key in ['4', '9', '0', 'a', ' '] {
            apply_input(&mut state, InputEvent::Key(key));
            assert_eq!(state.selector.get(), 3);
        }

        apply_input(&mut state, InputEvent::Key('1'));
        assert_eq!(state.selector.get(), 1);
    }

    #[test]
    fn test_pointer_with_empty_roster_is_noop() {
        let mut state = GameState::empty(1, 800.0, 800.0);
        apply_input(&mut state, InputEvent::Pointer { x: 1.0, y: 1.0 });
        apply_input(&mut state, InputEvent::Key('1'));
        assert_eq!(state.selector.get(), 1);
    }
}
