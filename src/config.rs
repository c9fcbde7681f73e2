//! Round configuration
//!
//! Supplied once when a `Round` is built and never mutated afterwards.
//! Loadable from JSON; missing fields fall back to the classic defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FIELD_CELLS, MIN_BUILDINGS};
use crate::error::ConfigError;

/// RGB display color
pub type Color = [u8; 3];

/// Immutable configuration for a duel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: i32,
    pub field_height: i32,

    // === Physics (pixels and seconds) ===
    /// Downward acceleration, px/s²
    pub gravity: f32,
    /// Wind acceleration range, px/s² (negative blows left)
    pub wind_min: f32,
    pub wind_max: f32,
    /// Launch speed per unit of power, px/s
    pub speed_per_power: f32,

    // === Skyline ===
    pub min_building_width: i32,
    pub max_building_width: i32,
    pub min_building_height: i32,
    pub max_building_height: i32,

    // === Geometry ===
    /// Side of the square gorilla sprite
    pub gorilla_size: i32,
    /// Hit-circle radius shared by both gorillas
    pub gorilla_radius: f32,
    pub banana_radius: f32,
    /// Radius carved out of the skyline, also the blast elimination radius
    pub explosion_radius: f32,

    // === Colors ===
    pub building_palette: Vec<Color>,
    pub player_colors: [Color; 2],
    pub player_names: [String; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 1024,
            field_height: 600,

            gravity: 500.0,
            wind_min: -200.0,
            wind_max: 200.0,
            speed_per_power: 8.0,

            min_building_width: 60,
            max_building_width: 120,
            min_building_height: 120,
            max_building_height: 380,

            gorilla_size: 28,
            gorilla_radius: 16.0,
            banana_radius: 4.0,
            explosion_radius: 28.0,

            building_palette: vec![[49, 78, 116], [53, 87, 128], [60, 97, 137], [67, 106, 149]],
            player_colors: [[255, 174, 66], [203, 108, 230]],
            player_names: ["P1".to_string(), "P2".to_string()],
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fewest buildings generation can produce: every building at max width
    pub fn min_building_count(&self) -> usize {
        let max_w = self.max_building_width.max(1);
        ((self.field_width + max_w - 1) / max_w).max(0) as usize
    }

    /// Check that a round can always be generated from this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cells = self.field_width.checked_mul(self.field_height);
        if self.field_width <= 0
            || self.field_height <= 0
            || cells.is_none_or(|c| c as usize > MAX_FIELD_CELLS)
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.field_width,
                height: self.field_height,
            });
        }

        if self.min_building_width < 1 || self.min_building_width > self.max_building_width {
            return Err(ConfigError::InvalidBuildingWidth {
                min: self.min_building_width,
                max: self.max_building_width,
            });
        }

        if self.min_building_height < 1
            || self.min_building_height > self.max_building_height
            || self.max_building_height > self.field_height
        {
            return Err(ConfigError::InvalidBuildingHeight {
                min: self.min_building_height,
                max: self.max_building_height,
                field_height: self.field_height,
            });
        }

        if self.building_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        if !self.wind_min.is_finite() || !self.wind_max.is_finite() || self.wind_min > self.wind_max {
            return Err(ConfigError::InvalidWindRange {
                min: self.wind_min,
                max: self.wind_max,
            });
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("banana_radius", self.banana_radius),
            ("explosion_radius", self.explosion_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }
        let positive = [
            ("speed_per_power", self.speed_per_power),
            ("gorilla_radius", self.gorilla_radius),
            ("gorilla_size", self.gorilla_size as f32),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }

        // Nothing may be larger than the field itself
        let reach = self.field_width.max(self.field_height) as f32;
        let bounded = [
            ("gorilla_radius", self.gorilla_radius),
            ("banana_radius", self.banana_radius),
            ("explosion_radius", self.explosion_radius),
            ("gorilla_size", self.gorilla_size as f32),
        ];
        for (name, value) in bounded {
            if value > reach {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }

        let count = self.min_building_count();
        if count < MIN_BUILDINGS {
            return Err(ConfigError::TooFewBuildings { count });
        }

        Ok(())
    }

    /// Wind as shown on the HUD (roughly -10..10 for the default range)
    pub fn wind_display(&self, wind: f32) -> f32 {
        let span = (self.wind_max - self.wind_min) / 20.0;
        if span > 0.0 { wind / span } else { 0.0 }
    }

    /// Wind relative to `wind_max` for the HUD arrow, in [-1, 1]
    pub fn wind_indicator(&self, wind: f32) -> f32 {
        if self.wind_max != 0.0 {
            (wind / self.wind_max).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
