//! Round lifecycle
//!
//! Builds a fresh skyline, places the gorillas and draws the wind. All
//! randomness comes from one seeded `Pcg32`, so a seed fixes a whole session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::Gorilla;
use super::state::{GameEvent, Round, RoundOutcome};
use super::terrain::{Building, TerrainField};
use super::turn::TurnState;
use crate::config::GameConfig;
use crate::consts::MIN_BUILDINGS;
use crate::error::ConfigError;

/// A hand-built round setup, for scripted scenarios and tests
#[derive(Debug, Clone)]
pub struct Layout {
    /// Skyline rasterized into the terrain
    pub buildings: Vec<Building>,
    /// Roofs the two gorillas stand on (need not be part of the skyline)
    pub spawns: [Building; 2],
    pub wind: f32,
}

/// Pick the left and right spawn buildings
///
/// Left comes from the first third, right from the last third. Neither uses
/// the outermost buildings, and there is always at least one building
/// between them.
pub fn pick_spawn_indices<R: Rng>(count: usize, rng: &mut R) -> Result<(usize, usize), ConfigError> {
    if count < MIN_BUILDINGS {
        return Err(ConfigError::TooFewBuildings { count });
    }
    let left = rng.random_range(1..=(count / 3).max(1));
    let right = rng.random_range((count * 2 / 3).max(left + 2)..=count - 2);
    Ok((left, right))
}

impl Round {
    /// Validate the configuration and generate the first round
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let (terrain, gorillas, wind) = generate(&config, &mut rng)?;
        let mut round = Self::assemble(config, seed, rng, terrain, gorillas, wind);
        round.announce();
        Ok(round)
    }

    /// Start from a fixed layout instead of a random skyline
    ///
    /// Later restarts generate random rounds from `seed`.
    pub fn from_layout(config: GameConfig, seed: u64, layout: &Layout) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = Pcg32::seed_from_u64(seed);
        let terrain = TerrainField::from_buildings(
            config.field_width,
            config.field_height,
            config.building_palette.clone(),
            &layout.buildings,
        );
        let gorillas = [
            Gorilla::spawn(0, &layout.spawns[0], &config),
            Gorilla::spawn(1, &layout.spawns[1], &config),
        ];
        let mut round = Self::assemble(config, seed, rng, terrain, gorillas, layout.wind);
        round.announce();
        Ok(round)
    }

    fn assemble(
        config: GameConfig,
        seed: u64,
        rng: Pcg32,
        terrain: TerrainField,
        gorillas: [Gorilla; 2],
        wind: f32,
    ) -> Self {
        Self {
            config,
            seed,
            rng,
            round_number: 1,
            terrain,
            gorillas,
            projectile: None,
            turn: TurnState::new(),
            wind,
            outcome: RoundOutcome::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Discard everything round-scoped and generate a new round
    ///
    /// Any banana in flight is dropped; the left gorilla throws first.
    pub fn new_round(&mut self) -> Result<(), ConfigError> {
        let (terrain, gorillas, wind) = generate(&self.config, &mut self.rng)?;
        self.terrain = terrain;
        self.gorillas = gorillas;
        self.wind = wind;
        self.projectile = None;
        self.turn = TurnState::new();
        self.outcome = RoundOutcome::default();
        self.time_ticks = 0;
        self.events.clear();
        self.round_number += 1;
        self.announce();
        Ok(())
    }

    fn announce(&mut self) {
        log::info!(
            "Round {} (seed {}): wind={:.1} field={}x{}",
            self.round_number,
            self.seed,
            self.wind,
            self.terrain.width(),
            self.terrain.height()
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.round_number,
            wind: self.wind,
        });
    }
}

/// Wind, skyline and spawns, drawn in that order
fn generate(
    config: &GameConfig,
    rng: &mut Pcg32,
) -> Result<(TerrainField, [Gorilla; 2], f32), ConfigError> {
    let wind = rng.random_range(config.wind_min..=config.wind_max);
    let (terrain, buildings) = TerrainField::generate(config, rng)?;
    let (left, right) = pick_spawn_indices(buildings.len(), rng)?;
    log::debug!(
        "Skyline: {} buildings, gorillas on #{} and #{}",
        buildings.len(),
        left,
        right
    );
    let gorillas = [
        Gorilla::spawn(0, &buildings[left], config),
        Gorilla::spawn(1, &buildings[right], config),
    ];
    Ok((terrain, gorillas, wind))
}
