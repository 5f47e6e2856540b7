//! Deterministic simulation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by dot index)
//! - No rendering or platform dependencies

pub mod input;
pub mod kinematics;
pub mod physics;
pub mod state;
pub mod tick;
pub mod trail;

pub use input::{InputBridge, PointerButton, PointerEvent};
pub use kinematics::{lerp, oscillate, smooth_toward};
pub use physics::{Body, BodyHandle, World};
pub use state::{Dot, DotSprite, DotState, Phase, SimState};
pub use tick::{TickInput, tick};
