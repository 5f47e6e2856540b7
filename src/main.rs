//! Dotburst entry point
//!
//! Headless demo: pumps the simulation with a scripted pointer and logs the
//! lifecycle as it plays out. Doubles as a reference for how an embedding
//! renderer should drive the core - fixed timestep with a substep cap, input
//! bridge drained once per tick, frame read after ticking.

use std::path::Path;

use glam::Vec2;

use dotburst::Config;
use dotburst::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use dotburst::sim::{InputBridge, Phase, PointerEvent, SimState, tick};

fn main() {
    env_logger::init();

    let config = Config::load(Path::new("dotburst.json"));
    let mut state = SimState::new(42, &config, Vec2::new(640.0, 360.0));
    let mut bridge = InputBridge::new();

    log::info!(
        "dotburst demo: {} idle dots, bursting to {}",
        config.idle_count,
        config.burst_count
    );

    let frame_ms = 1000.0 / 60.0;
    let mut accumulator = 0.0f32;
    let mut last_phase = state.phase;

    // Sweep the pointer for half a second, then hold still and let one full
    // burst cycle play out. Two minutes of simulated time is the cutoff.
    for frame in 0..(60 * 120) {
        let t = frame as f32 * frame_ms;
        if t < 500.0 {
            let angle = t * 0.01;
            bridge.push(PointerEvent::Moved {
                pos: Vec2::new(640.0 + angle.cos() * 120.0, 360.0 + angle.sin() * 120.0),
            });
        }

        accumulator += frame_ms;
        let mut substeps = 0;
        while accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = bridge.drain();
            tick(&mut state, &config, &input, SIM_DT_MS);
            accumulator -= SIM_DT_MS;
            substeps += 1;
        }

        if state.phase != last_phase {
            let frozen = state.dots.iter().filter(|d| d.frozen).count();
            log::info!(
                "t={:>7.0}ms  {:?} -> {:?}  ({} dots, {} frozen)",
                state.time_ms,
                last_phase,
                state.phase,
                state.dots.len(),
                frozen
            );
            let cycle_done = last_phase == Phase::Returning && state.phase == Phase::Idle;
            last_phase = state.phase;
            if cycle_done {
                break;
            }
        }
    }

    if let Some(head) = state.frame().next() {
        log::info!(
            "final head dot: pos=({:.1}, {:.1}) scale={:.2} size={:.1}",
            head.position.x,
            head.position.y,
            head.scale,
            head.size
        );
    }
}
