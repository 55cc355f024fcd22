//! Input aggregation
//!
//! Drag, tilt and button sources each compute a candidate x and hand it to
//! [`Player::set_x`], which clamps it into the arena. Last writer wins.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Player};
use crate::consts::*;

/// Clamp a candidate player x into `[0, ARENA_WIDTH - PLAYER_WIDTH]`
#[inline]
pub fn clamp_player_x(candidate: f32) -> f32 {
    candidate.min(PLAYER_MAX_X).max(0.0)
}

impl Player {
    /// Authoritative write of the player position. NaN is ignored.
    pub fn set_x(&mut self, candidate: f32) {
        if candidate.is_nan() {
            log::warn!("Ignoring NaN player position");
            return;
        }
        self.x = clamp_player_x(candidate);
    }
}

/// Direction of a discrete step control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Left,
    Right,
}

impl Step {
    /// Signed displacement for a step of `size`
    pub fn delta(self, size: f32) -> f32 {
        match self {
            Step::Left => -size,
            Step::Right => size,
        }
    }
}

/// A drag gesture in progress
///
/// Moves are measured from where the player stood when the gesture began,
/// so successive deltas do not accumulate on top of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragGesture {
    baseline: Option<f32>,
}

impl DragGesture {
    /// Capture the baseline at gesture start
    pub fn begin(&mut self, player_x: f32) {
        self.baseline = Some(player_x);
    }

    /// Candidate x for a total displacement since the gesture began
    pub fn candidate(&self, delta_from_start: f32) -> Option<f32> {
        self.baseline.map(|base| base + delta_from_start)
    }

    pub fn end(&mut self) {
        self.baseline = None;
    }

    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }
}

/// Candidate x for one tilt reading, or `None` inside the dead zone
pub fn tilt_candidate(current_x: f32, tilt: f32, sensitivity: f32, dead_zone: f32) -> Option<f32> {
    if !tilt.is_finite() || tilt.abs() <= dead_zone {
        return None;
    }
    Some(current_x + tilt * sensitivity)
}

impl GameState {
    /// Single entry point for every input source
    pub fn set_player_x(&mut self, candidate: f32) {
        self.player.set_x(candidate);
    }

    /// Absolute positioning (continuous controls)
    pub fn set_player_absolute(&mut self, x: f32) {
        self.set_player_x(x);
    }

    /// Relative positioning (discrete controls)
    pub fn move_player_by(&mut self, delta: f32) {
        let candidate = self.player.x + delta;
        self.set_player_x(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_extremes() {
        let mut state = GameState::new(1);
        state.set_player_x(-1.0e6);
        assert_eq!(state.player().x(), 0.0);
        state.set_player_x(1.0e6);
        assert_eq!(state.player().x(), ARENA_WIDTH - PLAYER_WIDTH);
        state.set_player_x(f32::NEG_INFINITY);
        assert_eq!(state.player().x(), 0.0);
        state.set_player_x(f32::INFINITY);
        assert_eq!(state.player().x(), PLAYER_MAX_X);
    }

    #[test]
    fn test_nan_leaves_position() {
        let mut state = GameState::new(1);
        state.set_player_x(42.0);
        state.set_player_x(f32::NAN);
        assert_eq!(state.player().x(), 42.0);
    }

    #[test]
    fn test_move_by_saturates() {
        let mut state = GameState::new(1);
        state.move_player_by(-5000.0);
        assert_eq!(state.player().x(), 0.0);
        state.move_player_by(30.0);
        assert_eq!(state.player().x(), 30.0);
        state.move_player_by(5000.0);
        assert_eq!(state.player().x(), PLAYER_MAX_X);
    }

    #[test]
    fn test_drag_composes_from_baseline() {
        let mut state = GameState::new(1);
        state.set_player_x(100.0);

        let mut drag = DragGesture::default();
        assert_eq!(drag.candidate(10.0), None);
        drag.begin(state.player().x());

        // Two consecutive moves report total displacement from the start
        for delta in [20.0, 35.0] {
            let candidate = drag.candidate(delta).unwrap();
            state.set_player_x(candidate);
        }
        assert_eq!(state.player().x(), 135.0);

        // Dragging back past the start lands relative to the baseline too
        state.set_player_x(drag.candidate(-30.0).unwrap());
        assert_eq!(state.player().x(), 70.0);

        drag.end();
        assert!(!drag.is_active());
    }

    #[test]
    fn test_tilt_dead_zone() {
        assert_eq!(tilt_candidate(100.0, 0.05, 20.0, 0.1), None);
        assert_eq!(tilt_candidate(100.0, 0.5, 20.0, 0.1), Some(110.0));
        assert_eq!(tilt_candidate(100.0, -1.0, 20.0, 0.1), Some(80.0));
        assert_eq!(tilt_candidate(100.0, f32::NAN, 20.0, 0.1), None);
    }

    #[test]
    fn test_step_delta() {
        assert_eq!(Step::Left.delta(15.0), -15.0);
        assert_eq!(Step::Right.delta(15.0), 15.0);
    }

    proptest! {
        #[test]
        fn clamped_for_any_candidate(c in proptest::num::f32::ANY) {
            let mut player = Player::default();
            player.set_x(c);
            prop_assert!(player.x() >= 0.0);
            prop_assert!(player.x() <= ARENA_WIDTH - PLAYER_WIDTH);
        }

        #[test]
        fn clamped_after_any_moves(deltas in proptest::collection::vec(-2000.0f32..2000.0, 0..32)) {
            let mut state = GameState::new(3);
            for d in deltas {
                state.move_player_by(d);
                prop_assert!(state.player().x() >= 0.0);
                prop_assert!(state.player().x() <= PLAYER_MAX_X);
            }
        }
    }
}
