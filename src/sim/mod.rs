//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed iteration order (gorillas by index)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod projectile;
pub mod round;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod turn;

pub use actor::{Gorilla, opponent};
pub use collision::{Impact, blast_victims, detect, out_of_bounds};
pub use projectile::Projectile;
pub use round::{Layout, pick_spawn_indices};
pub use snapshot::{GorillaView, RoundSnapshot};
pub use state::{EndReason, EventResponse, GameEvent, Phase, Round, RoundOutcome};
pub use terrain::{Building, EMPTY, TerrainField};
pub use tick::FixedStepper;
pub use turn::{Confirmed, InputEvent, InputMode, TurnState};
