//! Collision detection for the banana
//!
//! Pure queries against the gorillas and the skyline; the round decides what
//! to do with the result.

use glam::{IVec2, Vec2};

use super::actor::Gorilla;
use super::projectile::Projectile;
use super::terrain::TerrainField;
use crate::circles_touch;
use crate::config::GameConfig;
use crate::consts::OUT_OF_BOUNDS_MARGIN;

/// What the banana struck this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Still flying
    None,
    /// Left the field by more than the margin
    OutOfBounds,
    /// Direct hit on a gorilla (checked before terrain)
    Gorilla { index: usize, at: IVec2 },
    /// Landed on a solid cell
    Terrain { at: IVec2 },
}

/// Whether a position is too far outside the field to ever come back
pub fn out_of_bounds(pos: Vec2, width: i32, height: i32) -> bool {
    let m = OUT_OF_BOUNDS_MARGIN;
    pos.x < -m || pos.x > width as f32 + m || pos.y < -m || pos.y > height as f32 + m
}

/// Classify the banana's current position
///
/// Order matters: bounds, then gorillas by index, then terrain.
pub fn detect(
    banana: &Projectile,
    gorillas: &[Gorilla; 2],
    terrain: &TerrainField,
    config: &GameConfig,
) -> Impact {
    if out_of_bounds(banana.pos, terrain.width(), terrain.height()) {
        return Impact::OutOfBounds;
    }

    for g in gorillas {
        if circles_touch(banana.pos, config.banana_radius, g.center(), g.hit_radius()) {
            return Impact::Gorilla {
                index: g.index,
                at: banana.pos.as_ivec2(),
            };
        }
    }

    let cell = banana.cell();
    if terrain.is_solid(cell.x, cell.y) {
        return Impact::Terrain { at: cell };
    }

    Impact::None
}

/// Which gorillas an explosion at `center` catches, by index
pub fn blast_victims(center: IVec2, radius: f32, gorillas: &[Gorilla; 2]) -> [bool; 2] {
    let c = center.as_vec2();
    let mut caught = [false; 2];
    for g in gorillas {
        caught[g.index & 1] = circles_touch(c, radius, g.center(), g.hit_radius());
    }
    caught
}
