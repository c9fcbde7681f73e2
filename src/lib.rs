//! Gorillas - a two-player artillery duel over a destructible skyline
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, ballistics, collisions, turn state)
//! - `config`: Round configuration (field size, physics, palette)
//! - `error`: Configuration errors surfaced to the shell

pub mod config;
pub mod error;
pub mod sim;

pub use config::{Color, GameConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for stable ballistics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the stepper will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// How far outside the field a banana may travel before it counts as a miss
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;
    /// Extra gap between the thrower's hit circle and a freshly launched banana
    pub const LAUNCH_MARGIN: f32 = 3.0;

    /// Digits accepted in the angle/power entry buffer
    pub const MAX_INPUT_DIGITS: usize = 3;
    pub const MIN_ANGLE: u32 = 0;
    pub const MAX_ANGLE: u32 = 180;
    pub const MIN_POWER: u32 = 1;
    pub const MAX_POWER: u32 = 100;

    /// Largest terrain grid a configuration may ask for (4096 x 4096 cells)
    pub const MAX_FIELD_CELLS: usize = 4096 * 4096;

    /// Fewest buildings a skyline may have: one margin building on each side,
    /// two spawn roofs and at least one building between them.
    pub const MIN_BUILDINGS: usize = 5;
}

/// Unit vector for a screen-space angle (radians, y grows downward)
#[inline]
pub fn screen_direction(angle_rad: f32) -> Vec2 {
    Vec2::new(angle_rad.cos(), -angle_rad.sin())
}

/// Circle-circle overlap test (touching counts as a hit)
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) <= ra + rb
}
