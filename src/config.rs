//! Tuning surface for the swarm simulation
//!
//! A flat set of named numeric parameters, persisted as JSON. Every value is
//! hot-reloadable: `tick` reads the config fresh each call, so a changed value
//! takes effect on the next tick without restarting the state machine. The two
//! particle counts are the exception - they only apply at the next rebuild
//! (idle/burst boundary).

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Simulation parameters
///
/// Defaults match the hand-tuned values the effect ships with. Out-of-range
/// values are clamped by [`Config::sanitize`] rather than rejected - a visual
/// glitch beats a crash in a continuously-running animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of dots in the idle trail
    pub idle_count: usize,
    /// Number of particles during a burst cycle
    pub burst_count: usize,
    /// Dot diameter in the idle trail (px)
    pub dot_width: f32,
    /// Idle jitter oscillation speed
    pub chain_speed: f32,
    /// Chain-follow step factor (fraction of the gap closed per tick, x10)
    pub tail_factor: f32,
    /// Pointer stillness required before a burst starts (ms)
    pub idle_timeout_ms: f32,
    /// Attraction coefficient pulling particles back to the center
    pub attraction: f32,
    /// Outward impulse intensity, 0-10 scale
    pub burst_intensity: f32,
    /// Smallest particle diameter assigned at burst time (px)
    pub min_particle_size: f32,
    /// Largest particle diameter assigned at burst time (px)
    pub max_particle_size: f32,
    /// Idle jitter amplitude (px)
    pub shake_amplitude: f32,
    /// Shake amplitude at the start of the shaking ramp (px)
    pub shake_ramp_min: f32,
    /// Shake amplitude at the end of the shaking ramp (px)
    pub shake_ramp_max: f32,
    /// Duration of the shaking ramp (ms)
    pub phase1_duration_ms: f32,
    /// Duration of the outward burst (ms)
    pub phase2_duration_ms: f32,
    /// Pause after every particle has frozen (ms)
    pub phase4_duration_ms: f32,
    /// Assembly distance threshold (px); damping and freezing both key off
    /// three times this value
    pub assembly_threshold: f32,
    /// Scales the attraction force
    pub force_multiplier: f32,
    /// Per-tick exponential velocity damping, 0-1
    pub air_friction: f32,
    /// Velocity retained per tick inside the damping radius, 0-1
    pub inner_damping_factor: f32,
    /// Continuous time inside the freeze radius before a particle pins (ms)
    pub freeze_delay_ms: f32,
    /// Force fast-assembly behavior for every gathering phase
    pub fast_assembly: bool,
    /// Return duration when an interrupt cancels a burst mid-flight (ms)
    pub quick_cancel_ms: f32,
    /// Return duration for the natural end of a cycle (ms)
    pub return_duration_ms: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            idle_count: 46,
            burst_count: 100,
            dot_width: 22.0,
            chain_speed: 3.0,
            tail_factor: 4.0,
            idle_timeout_ms: 1000.0,
            attraction: 0.0001,
            burst_intensity: 4.0,
            min_particle_size: 13.0,
            max_particle_size: 20.0,
            shake_amplitude: 29.0,
            shake_ramp_min: 8.0,
            shake_ramp_max: 32.0,
            phase1_duration_ms: 2000.0,
            phase2_duration_ms: 300.0,
            phase4_duration_ms: 170.0,
            assembly_threshold: 13.0,
            force_multiplier: 700.0,
            air_friction: 0.067,
            inner_damping_factor: 1.0,
            freeze_delay_ms: 20000.0,
            fast_assembly: false,
            quick_cancel_ms: 300.0,
            return_duration_ms: 600.0,
        }
    }
}

impl Config {
    /// Clamp every parameter into a range the simulation survives.
    ///
    /// Counts go to at least 1, durations to at least 1 ms, an inverted size
    /// range is swapped, and coefficients that only make sense non-negative
    /// are floored at zero.
    pub fn sanitize(&mut self) {
        self.idle_count = self.idle_count.max(1);
        self.burst_count = self.burst_count.max(1);
        self.dot_width = self.dot_width.max(1.0);
        self.chain_speed = self.chain_speed.max(0.0);
        self.tail_factor = self.tail_factor.max(0.0);
        self.idle_timeout_ms = self.idle_timeout_ms.max(1.0);
        self.attraction = self.attraction.max(0.0);
        self.burst_intensity = self.burst_intensity.max(0.0);
        self.min_particle_size = self.min_particle_size.max(1.0);
        self.max_particle_size = self.max_particle_size.max(1.0);
        if self.min_particle_size > self.max_particle_size {
            std::mem::swap(&mut self.min_particle_size, &mut self.max_particle_size);
        }
        self.shake_amplitude = self.shake_amplitude.max(0.0);
        self.shake_ramp_min = self.shake_ramp_min.max(0.0);
        self.shake_ramp_max = self.shake_ramp_max.max(self.shake_ramp_min);
        self.phase1_duration_ms = self.phase1_duration_ms.max(1.0);
        self.phase2_duration_ms = self.phase2_duration_ms.max(1.0);
        self.phase4_duration_ms = self.phase4_duration_ms.max(1.0);
        self.assembly_threshold = self.assembly_threshold.max(1.0);
        self.force_multiplier = self.force_multiplier.max(0.0);
        self.air_friction = self.air_friction.clamp(0.0, 1.0);
        self.inner_damping_factor = self.inner_damping_factor.clamp(0.0, 1.0);
        self.freeze_delay_ms = self.freeze_delay_ms.max(0.0);
        self.quick_cancel_ms = self.quick_cancel_ms.max(1.0);
        self.return_duration_ms = self.return_duration_ms.max(1.0);
    }

    /// Load from a JSON file, falling back to defaults on any failure.
    ///
    /// The result is always sanitized; a half-valid file yields a runnable
    /// config rather than an error.
    pub fn load(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Bad config {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        };
        config.sanitize();
        config
    }

    /// Save as pretty-printed JSON. Failures are logged, not propagated.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save config {}: {e}", path.display());
                } else {
                    log::info!("Config saved to {}", path.display());
                }
            }
            Err(e) => log::warn!("Failed to serialize config: {e}"),
        }
    }
}
