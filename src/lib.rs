//! Dotburst - a pointer-trailing dot swarm
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase state machine, force field, idle trail)
//! - `config`: Data-driven tuning surface
//!
//! Rendering, DOM/window event plumbing, and styling are external collaborators:
//! they feed pointer events in through `sim::InputBridge` and read per-dot
//! position/scale/size tuples back out of `SimState::frame` each tick.

pub mod config;
pub mod sim;

pub use config::Config;
pub use sim::{DotSprite, InputBridge, Phase, PointerButton, PointerEvent, SimState, TickInput, tick};

/// Simulation tuning constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Outward impulse base magnitude at intensity 10
    pub const BURST_BASE_FORCE: f32 = 0.06;
    /// Random extra impulse magnitude at intensity 10
    pub const BURST_SPREAD_FORCE: f32 = 0.04;
    /// Softening term keeping the attraction force finite near the center
    pub const ATTRACTION_EPSILON: f32 = 5.0;
    /// Attraction multiplier while fast-assembly is engaged
    pub const FAST_ASSEMBLY_BOOST: f32 = 50.0;
    /// Exponential smoothing rate for the chain level (per tick)
    pub const CHAIN_SMOOTHING: f32 = 0.1;
    /// Padding added to every oscillation radius
    pub const SHAKE_RADIUS_PAD: f32 = 2.0;
    /// Oscillation speed ramp endpoints during the shaking phase
    pub const OSC_SPEED_RAMP: (f32, f32) = (1.0, 10.0);
    /// Damping/freeze radius as a multiple of the assembly threshold
    pub const ASSEMBLY_RADIUS_FACTOR: f32 = 3.0;
}
