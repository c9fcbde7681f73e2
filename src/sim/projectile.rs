//! Banana ballistics
//!
//! Semi-implicit Euler under constant gravity and wind. Screen space: y grows
//! downward, so an upward throw has negative vertical velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::LAUNCH_MARGIN;
use crate::screen_direction;

/// The single in-flight banana
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// True from launch until resolution. A resolved banana is dropped from
    /// the round, so a held `Projectile` is always alive.
    pub alive: bool,
}

impl Projectile {
    /// Throw from a gorilla's hit-circle center
    ///
    /// `angle_deg` is measured from +x toward up. The right-hand gorilla
    /// (index 1) has its angle mirrored so both sides aim toward the other.
    /// The banana spawns just outside the thrower's hit circle.
    pub fn launch(
        shooter_center: Vec2,
        angle_deg: f32,
        power: f32,
        shooter_index: usize,
        config: &GameConfig,
    ) -> Self {
        let speed = config.speed_per_power * power;

        let mut angle = angle_deg.to_radians();
        if shooter_index == 1 {
            angle = std::f32::consts::PI - angle;
        }

        let dir = screen_direction(angle);
        let len = match dir.length() {
            l if l > 0.0 => l,
            _ => 1.0,
        };
        let unit = dir / len;

        let offset = config.gorilla_radius + config.banana_radius + LAUNCH_MARGIN;
        Self {
            pos: shooter_center + unit * offset,
            vel: dir * speed,
            alive: true,
        }
    }

    /// Advance one step: velocity first, then position
    pub fn integrate(&mut self, dt: f32, wind: f32, gravity: f32) {
        self.vel += Vec2::new(wind, gravity) * dt;
        self.pos += self.vel * dt;
    }

    /// Nearest grid cell to the banana's center
    #[inline]
    pub fn cell(&self) -> glam::IVec2 {
        self.pos.round().as_ivec2()
    }
}
