//! Simulation state and core types
//!
//! A single `SimState` value holds everything the controller mutates. It is
//! owned by the caller and passed into `tick` - no globals - so independent
//! instances can run side by side and tests drive the machine directly.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::physics::{BodyHandle, World};
use crate::config::Config;

/// Current phase of the burst lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chain trails the pointer; waiting for it to go still
    Idle,
    /// Dots cluster at the blast center and oscillate with growing amplitude
    Shaking,
    /// One outward impulse per particle
    Bursting,
    /// Attraction pulls particles back until every one has frozen
    Gathering,
    /// Short pause with the cluster pinned in place
    Resting,
    /// Interpolated collapse back onto the pointer
    Returning,
}

/// Where a dot's position lives
///
/// While `Free` the dot owns its position. Once a body exists the body is
/// authoritative and position readout projects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DotState {
    Free { pos: Vec2 },
    Bound { body: BodyHandle },
}

/// One marker in the swarm
#[derive(Debug, Clone)]
pub struct Dot {
    pub index: usize,
    pub state: DotState,
    /// Index-derived taper: 1 at the head, shrinking toward the tail
    pub scale: f32,
    /// Scale handed to the renderer this tick
    pub render_scale: f32,
    /// Diameter handed to the renderer (idle width, or the burst size)
    pub visual_size: f32,
    pub locked: bool,
    pub lock_anchor: Vec2,
    /// Independent oscillation phase accumulators
    pub phase_x: f32,
    pub phase_y: f32,
    pub shake_radius: f32,
    /// Fixed outward impulse direction for this generation
    pub burst_angle: f32,
    /// Guards the outward impulse so it applies exactly once
    pub burst_applied: bool,
    /// Distance from the blast center at impulse time (diagnostic)
    pub distance_at_burst: f32,
    /// Pinned static; never unset before the generation is discarded
    pub frozen: bool,
    /// Sim-clock time the dot entered the freeze radius, None while outside
    pub freeze_entered_ms: Option<f64>,
    /// Interpolation start captured when a return begins
    pub return_start: Vec2,
    pub return_start_scale: f32,
}

impl Dot {
    fn new(
        index: usize,
        total: usize,
        pos: Vec2,
        width: f32,
        shake_amplitude: f32,
        rng: &mut Pcg32,
    ) -> Self {
        let scale = taper_scale(index, total);
        Self {
            index,
            state: DotState::Free { pos },
            scale,
            render_scale: scale,
            visual_size: width,
            locked: false,
            lock_anchor: pos,
            phase_x: rng.random_range(0.0..TAU),
            phase_y: rng.random_range(0.0..TAU),
            shake_radius: shake_amplitude / 2.0 + crate::consts::SHAKE_RADIUS_PAD,
            burst_angle: rng.random_range(0.0..TAU),
            burst_applied: false,
            distance_at_burst: 0.0,
            frozen: false,
            freeze_entered_ms: None,
            return_start: pos,
            return_start_scale: 1.0,
        }
    }

    /// Current position: owned while `Free`, projected from the body while
    /// `Bound`
    pub fn position(&self, world: &World) -> Vec2 {
        match self.state {
            DotState::Free { pos } => pos,
            DotState::Bound { body } => world.body(body).position,
        }
    }

    /// Acquire a jitter anchor.
    ///
    /// Re-locking re-randomizes both phase accumulators so freshly locked
    /// dots never oscillate in sync.
    pub fn lock(&mut self, anchor: Vec2, rng: &mut Pcg32) {
        self.lock_anchor = anchor;
        self.phase_x = rng.random_range(0.0..TAU);
        self.phase_y = rng.random_range(0.0..TAU);
        self.locked = true;
    }
}

/// Head-to-tail taper: `1 - (index/(total-1)) * 0.9`, clamped to 1 for a
/// single dot
pub fn taper_scale(index: usize, total: usize) -> f32 {
    if total > 1 {
        1.0 - (index as f32 / (total - 1) as f32) * 0.9
    } else {
        1.0
    }
}

/// Per-dot output consumed by the renderer each tick
///
/// The renderer owns all styling; nothing else crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotSprite {
    pub position: Vec2,
    pub scale: f32,
    pub size: f32,
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    /// Sim clock, ms of accumulated fixed timesteps
    pub time_ms: f64,
    /// Sim-clock time of the last phase transition
    pub phase_entered_ms: f64,
    /// Time since the pointer last moved
    pub idle_ms: f64,
    /// Live pointer position
    pub pointer: Vec2,
    /// Attraction/blast focal point; present from Shaking entry until the
    /// cycle resets to Idle
    pub center: Option<Vec2>,
    /// Blend between jitter (0) and chain-follow (1), smoothed every tick
    pub chain_level: f32,
    pub target_chain_level: f32,
    /// Jitter amplitude; ramped during Shaking, restored from config on reset
    pub shake_amplitude: f32,
    /// Oscillation speed; ramped during Shaking, restored from config on reset
    pub osc_speed: f32,
    /// Particle count snapshotted when a burst starts
    pub burst_count: usize,
    /// Duration of the current/next Returning phase
    pub return_duration_ms: f32,
    /// Interrupt-triggered mode: no freeze delay, boosted attraction
    pub fast_assembly: bool,
    pub dots: Vec<Dot>,
    /// Force field; empty outside the burst portion of a cycle
    pub world: World,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Create a state in phase Idle with a full idle trail at `pointer`
    pub fn new(seed: u64, config: &Config, pointer: Vec2) -> Self {
        let mut state = Self {
            seed,
            phase: Phase::Idle,
            time_ms: 0.0,
            phase_entered_ms: 0.0,
            idle_ms: 0.0,
            pointer,
            center: None,
            chain_level: 1.0,
            target_chain_level: 1.0,
            shake_amplitude: config.shake_amplitude,
            osc_speed: config.chain_speed,
            burst_count: config.burst_count,
            return_duration_ms: config.return_duration_ms,
            fast_assembly: false,
            dots: Vec::new(),
            world: World::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.rebuild_dots(config.idle_count, config.dot_width);
        state
    }

    /// Dispose of every dot and allocate `count` fresh ones at the pointer.
    ///
    /// Bodies are not touched here; the controller clears the world at the
    /// same boundaries it rebuilds dots.
    pub fn rebuild_dots(&mut self, count: usize, width: f32) {
        self.dots.clear();
        for index in 0..count {
            let dot = Dot::new(
                index,
                count,
                self.pointer,
                width,
                self.shake_amplitude,
                &mut self.rng,
            );
            self.dots.push(dot);
        }
    }

    /// Position readout for a dot of this state
    pub fn dot_position(&self, dot: &Dot) -> Vec2 {
        dot.position(&self.world)
    }

    /// Per-tick render output, one sprite per dot in index order
    pub fn frame(&self) -> impl Iterator<Item = DotSprite> + '_ {
        self.dots.iter().map(|dot| DotSprite {
            position: dot.position(&self.world),
            scale: dot.render_scale,
            size: dot.visual_size,
        })
    }
}
