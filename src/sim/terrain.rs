//! Destructible skyline
//!
//! The terrain is a per-pixel occupancy grid. Each cell holds either the
//! empty marker or a 1-based index into the building palette, so physics
//! never depends on a rendering surface.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Color, GameConfig};
use crate::consts::MIN_BUILDINGS;
use crate::error::ConfigError;

/// Cell value for open sky
pub const EMPTY: u8 = 0;

/// A building rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Building {
    /// Building anchored to the bottom of a field `field_height` tall
    pub fn grounded(x: i32, width: i32, height: i32, field_height: i32) -> Self {
        Self {
            x,
            y: field_height - height,
            width,
            height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

/// Occupancy/color grid for the skyline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainField {
    width: i32,
    height: i32,
    /// Row-major, `EMPTY` or palette index + 1
    cells: Vec<u8>,
    palette: Vec<Color>,
    /// Bumped whenever an erase actually clears cells
    revision: u64,
}

impl TerrainField {
    /// An empty field
    pub fn new(width: i32, height: i32, palette: Vec<Color>) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
            palette,
            revision: 0,
        }
    }

    /// Tile the field with a random skyline
    ///
    /// Returns the field and the generated buildings, left to right.
    pub fn generate<R: Rng>(
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<(Self, Vec<Building>), ConfigError> {
        let mut buildings = Vec::new();
        let mut x = 0;
        while x < config.field_width {
            let mut width = rng.random_range(config.min_building_width..=config.max_building_width);
            let height = rng.random_range(config.min_building_height..=config.max_building_height);
            if x + width > config.field_width {
                width = config.field_width - x;
            }
            buildings.push(Building::grounded(x, width, height, config.field_height));
            x += width;
        }

        if buildings.len() < MIN_BUILDINGS {
            return Err(ConfigError::TooFewBuildings {
                count: buildings.len(),
            });
        }

        let field = Self::from_buildings(
            config.field_width,
            config.field_height,
            config.building_palette.clone(),
            &buildings,
        );
        Ok((field, buildings))
    }

    /// Rasterize a given skyline
    pub fn from_buildings(
        width: i32,
        height: i32,
        palette: Vec<Color>,
        buildings: &[Building],
    ) -> Self {
        let mut field = Self::new(width, height, palette);
        let palette_len = field.palette.len().max(1);
        for (i, b) in buildings.iter().enumerate() {
            let marker = (i % palette_len) as u8 + 1;
            field.fill_rect(*b, marker);
        }
        field
    }

    fn fill_rect(&mut self, b: Building, marker: u8) {
        let x0 = b.x.max(0);
        let x1 = b.right().min(self.width);
        let y0 = b.y.max(0);
        let y1 = (b.y + b.height).min(self.height);
        if x0 >= x1 {
            return;
        }
        let stride = self.width as usize;
        for y in y0..y1 {
            let row = y as usize * stride;
            self.cells[row + x0 as usize..row + x1 as usize].fill(marker);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    /// Whether a cell is solid; anything off the grid is open sky
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i] != EMPTY)
    }

    /// Display color of a solid cell
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        let marker = self.cells[self.index(x, y)?];
        if marker == EMPTY {
            return None;
        }
        self.palette.get(marker as usize - 1).copied()
    }

    /// Clear every cell within `radius` of `center` (inclusive)
    ///
    /// Returns the number of cells that were solid before the erase.
    pub fn erase_circle(&mut self, center: IVec2, radius: f32) -> usize {
        if radius.is_nan() || radius < 0.0 {
            return 0;
        }
        // A disk wider than the whole grid clears the same cells as this one
        let radius = radius.min((self.width as f32).hypot(self.height as f32) + 1.0);
        let r = radius.floor() as i64;
        let r_sq = radius * radius;
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let stride = self.width as usize;
        let mut cleared = 0;
        for y in (cy - r).max(0)..=(cy + r).min(i64::from(self.height) - 1) {
            for x in (cx - r).max(0)..=(cx + r).min(i64::from(self.width) - 1) {
                let d = Vec2::new((x - cx) as f32, (y - cy) as f32);
                if d.length_squared() <= r_sq {
                    let i = y as usize * stride + x as usize;
                    if self.cells[i] != EMPTY {
                        self.cells[i] = EMPTY;
                        cleared += 1;
                    }
                }
            }
        }
        if cleared > 0 {
            self.revision += 1;
        }
        cleared
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw row-major grid (`EMPTY` or palette index + 1)
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn solid_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }
}
