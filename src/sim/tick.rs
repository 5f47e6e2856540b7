//! Fixed timestep simulation tick
//!
//! Core loop that advances the burst lifecycle deterministically. One call =
//! one tick: input is applied first and fully supersedes the phase logic it
//! preempts, then the current phase runs, then the force field integrates, so
//! a frame read after `tick` never observes a half-updated generation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::input::PointerButton;
use super::kinematics::{lerp, oscillate, smooth_toward};
use super::state::{DotState, Phase, SimState};
use super::trail;
use crate::config::Config;
use crate::consts::*;

/// Input signals for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// New pointer position, present only on ticks where the pointer moved
    pub pointer: Option<Vec2>,
    /// Button press edge for this tick
    pub pressed: Option<PointerButton>,
}

/// Advance the simulation by one fixed timestep of `dt` milliseconds
pub fn tick(state: &mut SimState, config: &Config, input: &TickInput, dt: f32) {
    state.time_ms += dt as f64;

    apply_input(state, config, input, dt);

    // Burst trigger: the pointer has been still past the timeout
    if state.phase == Phase::Idle && state.idle_ms > config.idle_timeout_ms as f64 {
        start_burst(state, config);
    }

    match state.phase {
        Phase::Idle => trail::update(state, config),
        Phase::Shaking => update_shaking(state, config),
        Phase::Bursting => update_bursting(state, config),
        Phase::Gathering => update_gathering(state, config),
        Phase::Resting => {
            if elapsed(state) >= config.phase4_duration_ms as f64 {
                begin_return(state, config.return_duration_ms);
            }
        }
        Phase::Returning => update_returning(state, config),
    }

    // Controller before integration; the Returning phase positions bodies
    // kinematically and skips the integrator entirely.
    if matches!(
        state.phase,
        Phase::Bursting | Phase::Gathering | Phase::Resting
    ) {
        state.world.update(dt);
    }

    state.chain_level = smooth_toward(state.chain_level, state.target_chain_level, CHAIN_SMOOTHING);
}

/// Milliseconds spent in the current phase
fn elapsed(state: &SimState) -> f64 {
    state.time_ms - state.phase_entered_ms
}

/// Normalized progress through the current phase, clamped to [0, 1]
fn phase_progress(state: &SimState, duration_ms: f32) -> f32 {
    (elapsed(state) / duration_ms.max(1.0) as f64).min(1.0) as f32
}

fn enter_phase(state: &mut SimState, phase: Phase) {
    log::debug!(
        "phase {:?} -> {:?} at {:.0}ms",
        state.phase,
        phase,
        state.time_ms
    );
    state.phase = phase;
    state.phase_entered_ms = state.time_ms;
}

/// Apply this tick's input signals before any phase logic runs.
///
/// Policy: movement or a press during Shaking cancels the burst outright
/// (quick deflate); during Bursting/Gathering/Resting movement drags the
/// blast center along and a primary press engages fast-assembly.
fn apply_input(state: &mut SimState, config: &Config, input: &TickInput, dt: f32) {
    if let Some(pos) = input.pointer {
        state.pointer = pos;
        state.idle_ms = 0.0;
        match state.phase {
            Phase::Idle => {
                state.target_chain_level = 1.0;
                state.center = None;
                for dot in &mut state.dots {
                    dot.locked = false;
                }
            }
            Phase::Shaking => quick_cancel(state, config),
            Phase::Bursting | Phase::Gathering | Phase::Resting => {
                state.center = Some(pos);
            }
            Phase::Returning => {}
        }
    } else {
        state.idle_ms += dt as f64;
    }

    if let Some(button) = input.pressed {
        state.idle_ms = 0.0;
        match state.phase {
            Phase::Shaking => quick_cancel(state, config),
            Phase::Bursting if button == PointerButton::Primary => {
                state.fast_assembly = true;
                enter_phase(state, Phase::Gathering);
            }
            Phase::Gathering | Phase::Resting if button == PointerButton::Primary => {
                state.fast_assembly = true;
            }
            _ => {}
        }
    }
}

/// Arm a burst: snapshot the particle count, rebuild the swarm at the
/// pointer, and start shaking around it.
fn start_burst(state: &mut SimState, config: &Config) {
    state.burst_count = config.burst_count;
    state.center = Some(state.pointer);
    state.rebuild_dots(state.burst_count, config.dot_width);
    state.target_chain_level = 0.0;
    enter_phase(state, Phase::Shaking);
}

/// Phase 1: oscillation amplitude and speed ramp up over the phase duration.
fn update_shaking(state: &mut SimState, config: &Config) {
    let t = phase_progress(state, config.phase1_duration_ms);
    state.shake_amplitude = lerp(config.shake_ramp_min, config.shake_ramp_max, t);
    state.osc_speed = lerp(OSC_SPEED_RAMP.0, OSC_SPEED_RAMP.1, t);

    let center = state.center;
    let shake_radius = state.shake_amplitude / 2.0 + SHAKE_RADIUS_PAD;
    let osc_speed = state.osc_speed;
    for i in 0..state.dots.len() {
        let current = state.dots[i].position(&state.world);
        let anchor = center.unwrap_or(current);
        let dot = &mut state.dots[i];
        dot.shake_radius = shake_radius;
        if !dot.locked {
            dot.lock(anchor, &mut state.rng);
        }
        dot.phase_x += osc_speed / 100.0;
        dot.phase_y += osc_speed / 100.0;
        let pos = oscillate(dot.lock_anchor, dot.phase_x, dot.phase_y, dot.shake_radius);
        dot.state = DotState::Free { pos };
    }

    if t >= 1.0 {
        arm_bodies(state, config);
        enter_phase(state, Phase::Bursting);
    }
}

/// End of the shaking ramp: snap every dot to its anchor and hand the
/// generation to the force field, one fresh body per dot.
fn arm_bodies(state: &mut SimState, config: &Config) {
    let center = state.center;
    for i in 0..state.dots.len() {
        let current = state.dots[i].position(&state.world);
        let anchor = center.unwrap_or(current);
        let dot = &mut state.dots[i];
        dot.lock(anchor, &mut state.rng);
        dot.state = DotState::Free { pos: anchor };
    }

    for dot in &mut state.dots {
        let size = lerp(
            config.min_particle_size,
            config.max_particle_size,
            state.rng.random::<f32>(),
        );
        dot.visual_size = size;
        dot.render_scale = 1.0;
        let pos = match dot.state {
            DotState::Free { pos } => pos,
            DotState::Bound { body } => state.world.body(body).position,
        };
        let body = state.world.add_body(pos, size / 2.0, config.air_friction);
        dot.burst_angle = state.rng.random_range(0.0..TAU);
        dot.burst_applied = false;
        dot.state = DotState::Bound { body };
    }
}

/// Phase 2: one outward impulse per particle, exactly once.
fn update_bursting(state: &mut SimState, config: &Config) {
    let Some(center) = state.center else { return };

    let scale_factor = config.burst_intensity / 10.0;
    for dot in &mut state.dots {
        let DotState::Bound { body } = dot.state else {
            continue;
        };
        if dot.burst_applied {
            continue;
        }
        let base = BURST_BASE_FORCE * scale_factor;
        let spread = state.rng.random::<f32>() * BURST_SPREAD_FORCE * scale_factor;
        let direction = Vec2::new(dot.burst_angle.cos(), dot.burst_angle.sin());
        state.world.apply_force(body, direction * (base + spread));
        dot.burst_applied = true;
        dot.distance_at_burst = state.world.body(body).position.distance(center);
    }

    if elapsed(state) >= config.phase2_duration_ms as f64 {
        enter_phase(state, Phase::Gathering);
    }
}

/// Phase 3: attraction outside the damping radius, velocity damping inside
/// it, and a freeze timer for every particle that stays close to the center.
fn update_gathering(state: &mut SimState, config: &Config) {
    let Some(center) = state.center else { return };

    let fast = state.fast_assembly || config.fast_assembly;
    let freeze_delay = if fast { 0.0 } else { config.freeze_delay_ms as f64 };
    // Damping and freezing key off the same radius; the freeze radius must
    // never exceed the damping radius
    let radius = config.assembly_threshold * ASSEMBLY_RADIUS_FACTOR;
    let now = state.time_ms;

    let mut all_frozen = true;
    for dot in &mut state.dots {
        let DotState::Bound { body } = dot.state else {
            continue;
        };
        if dot.frozen {
            continue;
        }
        all_frozen = false;

        let pos = state.world.body(body).position;
        let delta = center - pos;
        let distance = delta.length();

        if distance > radius {
            let boost = if fast { FAST_ASSEMBLY_BOOST } else { 1.0 };
            let magnitude = (config.attraction * boost)
                / (distance * distance + ATTRACTION_EPSILON * ATTRACTION_EPSILON)
                * config.force_multiplier;
            state.world.apply_force(body, delta * magnitude);
        } else {
            let velocity = state.world.body(body).velocity;
            state
                .world
                .set_velocity(body, velocity * config.inner_damping_factor);
        }

        if distance <= radius {
            match dot.freeze_entered_ms {
                None => dot.freeze_entered_ms = Some(now),
                Some(entered) if now - entered >= freeze_delay => {
                    state.world.set_static(body);
                    dot.frozen = true;
                }
                Some(_) => {}
            }
        } else {
            dot.freeze_entered_ms = None;
        }
    }

    if all_frozen {
        enter_phase(state, Phase::Resting);
    }
}

/// Phase 5: glide every dot along the segment from its snapshot to the live
/// pointer, melting scale back to the idle taper.
fn update_returning(state: &mut SimState, config: &Config) {
    let t = phase_progress(state, state.return_duration_ms);
    if t >= 1.0 {
        finish_return(state, config);
        return;
    }

    let target = state.pointer;
    for i in 0..state.dots.len() {
        let dot = &mut state.dots[i];
        let pos = dot.return_start.lerp(target, t);
        dot.render_scale = lerp(dot.return_start_scale, dot.scale, t);
        match dot.state {
            DotState::Free { .. } => dot.state = DotState::Free { pos },
            // Bodies are frozen or coasting; during the return they are
            // positioned kinematically and the integrator is skipped
            DotState::Bound { body } => state.world.set_position(body, pos),
        }
    }
}

/// Cancel whatever burst portion is in flight and glide home over
/// `duration_ms`. No-op while Idle or already Returning.
fn begin_return(state: &mut SimState, duration_ms: f32) {
    if matches!(state.phase, Phase::Idle | Phase::Returning) {
        return;
    }
    state.return_duration_ms = duration_ms;
    for i in 0..state.dots.len() {
        let pos = state.dots[i].position(&state.world);
        let dot = &mut state.dots[i];
        dot.return_start = pos;
        dot.return_start_scale = 1.0;
    }
    enter_phase(state, Phase::Returning);
}

fn quick_cancel(state: &mut SimState, config: &Config) {
    begin_return(state, config.quick_cancel_ms);
}

/// End of a cycle: discard the generation and restore the idle trail.
fn finish_return(state: &mut SimState, config: &Config) {
    state.world.clear();
    state.shake_amplitude = config.shake_amplitude;
    state.osc_speed = config.chain_speed;
    state.rebuild_dots(config.idle_count, config.dot_width);
    state.center = None;
    state.target_chain_level = 1.0;
    state.fast_assembly = false;
    enter_phase(state, Phase::Idle);
}
