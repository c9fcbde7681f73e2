//! The two gorillas
//!
//! Gorillas are placed, not simulated: once spawned on a roof they never
//! move. Only the round outcome records whether one was struck.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::terrain::Building;
use crate::config::{Color, GameConfig};

/// A competitor standing on a rooftop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gorilla {
    /// Side index (0 = left, 1 = right)
    pub index: usize,
    pub name: String,
    pub color: Color,
    /// Top-left corner of the square sprite
    pub top_left: IVec2,
    pub size: i32,
    hit_radius: f32,
}

impl Gorilla {
    /// Stand a gorilla on the middle of a building's roof
    pub fn spawn(index: usize, building: &Building, config: &GameConfig) -> Self {
        let size = config.gorilla_size;
        Self {
            index,
            name: config.player_names[index & 1].clone(),
            color: config.player_colors[index & 1],
            top_left: IVec2::new(building.center_x() - size / 2, building.y - size),
            size,
            hit_radius: config.gorilla_radius,
        }
    }

    /// Center of the hit circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.top_left + IVec2::splat(self.size / 2)).as_vec2()
    }

    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.hit_radius
    }
}

/// Index of the opposing side
#[inline]
pub fn opponent(index: usize) -> usize {
    1 - (index & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_on_roof_center() {
        let config = GameConfig::default();
        let building = Building::grounded(100, 80, 200, config.field_height);
        let g = Gorilla::spawn(0, &building, &config);

        assert_eq!(g.top_left, IVec2::new(140 - 14, 400 - 28));
        assert_eq!(g.center(), Vec2::new(140.0, 386.0));
        assert_eq!(g.hit_radius(), 16.0);
        assert_eq!(g.name, "P1");
        assert_eq!(g.color, config.player_colors[0]);
    }

    #[test]
    fn test_second_gorilla_identity() {
        let config = GameConfig::default();
        let building = Building::grounded(700, 61, 150, config.field_height);
        let g = Gorilla::spawn(1, &building, &config);
        assert_eq!(g.name, "P2");
        assert_eq!(g.center().x, (700 + 30) as f32);
        assert!(g.center().y < building.y as f32);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(opponent(0), 1);
        assert_eq!(opponent(1), 0);
    }
}
