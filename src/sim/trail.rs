//! Idle trail - the chain-follow behavior for phase 0
//!
//! The head dot targets the live pointer; every later dot chases the point a
//! fractional step along the gap toward its neighbor, which produces the
//! lagging elastic chain. A chain level in [0, 1] blends each dot between
//! that chase target and an independent sinusoidal jitter around its lock
//! anchor, so the trail melts between "settled, breathing" and "chasing".

use super::kinematics::oscillate;
use super::state::{DotState, SimState};
use crate::config::Config;

/// Advance every dot one tick of idle behavior.
///
/// Chain-level smoothing itself lives in the controller; this reads the
/// already-smoothed value.
pub fn update(state: &mut SimState, config: &Config) {
    if state.dots.is_empty() {
        return;
    }

    let mut target = state.pointer;
    let step = config.tail_factor / 10.0 * state.chain_level;
    // The chain only feeds forward while fully engaged; during the blend-out
    // toward a burst the dots keep melting but stop chasing each other.
    let chain_active = state.target_chain_level == 1.0;
    let len = state.dots.len();
    let chain_level = state.chain_level;
    let osc_speed = state.osc_speed;

    for i in 0..len {
        let current = state.dots[i].position(&state.world);
        let anchor = state.center.unwrap_or(current);

        let dot = &mut state.dots[i];
        dot.visual_size = config.dot_width;
        let pos = if chain_level < 1.0 {
            if !dot.locked {
                dot.lock(anchor, &mut state.rng);
            }
            dot.phase_x += osc_speed / 100.0;
            dot.phase_y += osc_speed / 100.0;
            let jitter = oscillate(dot.lock_anchor, dot.phase_x, dot.phase_y, dot.shake_radius);
            target * chain_level + jitter * (1.0 - chain_level)
        } else {
            dot.locked = false;
            target
        };
        dot.state = DotState::Free { pos };

        if chain_active {
            // Chase vector reads the neighbor's pre-update position and this
            // dot's post-update one, same as drawing the chain in index order
            let next = state.dots[(i + 1) % len].position(&state.world);
            target += (next - pos) * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimState;
    use glam::Vec2;

    fn settled_state(pointer: Vec2) -> SimState {
        let config = Config::default();
        let mut state = SimState::new(3, &config, Vec2::ZERO);
        state.pointer = pointer;
        state
    }

    #[test]
    fn test_head_dot_tracks_pointer_exactly() {
        let config = Config::default();
        let mut state = settled_state(Vec2::new(300.0, 200.0));
        update(&mut state, &config);
        let head = state.dots[0].position(&state.world);
        assert_eq!(head, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_tail_lags_behind_head() {
        let config = Config::default();
        let mut state = settled_state(Vec2::new(300.0, 0.0));
        update(&mut state, &config);
        // Dots start at the origin; each successive chase target only closes
        // a fraction of the gap, so the tail sits short of the head.
        let head = state.dots[0].position(&state.world);
        let tail = state.dots.last().unwrap().position(&state.world);
        assert!(tail.x < head.x);
    }

    #[test]
    fn test_blend_locks_and_jitters_when_chain_level_low() {
        let config = Config::default();
        let mut state = settled_state(Vec2::new(300.0, 200.0));
        state.chain_level = 0.0;
        state.target_chain_level = 0.0;
        update(&mut state, &config);
        for dot in &state.dots {
            assert!(dot.locked);
            let pos = dot.position(&state.world);
            // Pure jitter: within shake radius of the anchor, pointer ignored
            assert!((pos - dot.lock_anchor).length() <= dot.shake_radius * 1.5);
        }
    }

    #[test]
    fn test_lock_anchor_prefers_center() {
        let config = Config::default();
        let center = Vec2::new(50.0, 60.0);
        let mut state = settled_state(Vec2::new(300.0, 200.0));
        state.chain_level = 0.0;
        state.center = Some(center);
        update(&mut state, &config);
        assert!(state.dots.iter().all(|d| d.lock_anchor == center));
    }

    #[test]
    fn test_moving_pointer_drags_the_whole_chain() {
        let config = Config::default();
        let mut state = settled_state(Vec2::new(100.0, 100.0));
        for _ in 0..300 {
            update(&mut state, &config);
        }
        // After settling, every dot has been pulled off the origin
        for dot in &state.dots {
            assert!(dot.position(&state.world).length() > 1.0);
        }
    }
}
