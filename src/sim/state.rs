//! Round state and input handling
//!
//! `Round` is the single owned aggregate: terrain, gorillas, banana, turn
//! state and outcome. The shell talks to it only through `handle_event`,
//! `tick` and the read-only accessors.

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Gorilla;
use super::projectile::Projectile;
use super::terrain::TerrainField;
use super::turn::{Confirmed, InputEvent, InputMode, TurnState};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Where the round is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    CollectingAngle,
    CollectingPower,
    FlightInProgress,
    RoundOver,
}

/// How a round was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The banana struck a gorilla
    DirectHit,
    /// A gorilla was caught in a terrain explosion
    Blast,
}

/// Round result; `over` with no winner is a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub over: bool,
    pub winner: Option<usize>,
}

/// Things that happened since the shell last asked, for effects and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32, wind: f32 },
    Launched { shooter: usize, angle: u32, power: u32 },
    Explosion { center: IVec2, radius: f32, cleared: usize },
    ShotMissed { shooter: usize },
    TurnChanged { current: usize },
    RoundOver { winner: Option<usize>, reason: EndReason },
}

/// Reply to an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Continue,
    /// The shell should shut down
    Quit,
}

/// One duel, from skyline generation to a decided or drawn outcome
#[derive(Debug, Clone)]
pub struct Round {
    pub(crate) config: GameConfig,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    /// 1-based, bumped by every restart
    pub(crate) round_number: u32,
    pub(crate) terrain: TerrainField,
    pub(crate) gorillas: [Gorilla; 2],
    pub(crate) projectile: Option<Projectile>,
    pub(crate) turn: TurnState,
    pub(crate) wind: f32,
    pub(crate) outcome: RoundOutcome,
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl Round {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn gorillas(&self) -> &[Gorilla; 2] {
        &self.gorillas
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Horizontal wind acceleration for this round, px/s²
    pub fn wind(&self) -> f32 {
        self.wind
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Simulation steps taken this round
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.over {
            Phase::RoundOver
        } else if self.projectile.is_some() {
            Phase::FlightInProgress
        } else if self.turn.mode == InputMode::CollectingPower {
            Phase::CollectingPower
        } else {
            Phase::CollectingAngle
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one input event from the shell
    ///
    /// Only `Restart` can fail, and only if a new skyline cannot be built.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<EventResponse, ConfigError> {
        match event {
            InputEvent::QuitRequested => return Ok(EventResponse::Quit),
            InputEvent::Restart => {
                self.new_round()?;
                return Ok(EventResponse::Continue);
            }
            _ => {}
        }

        if !self.accepts_input() {
            return Ok(EventResponse::Continue);
        }

        match event {
            InputEvent::Digit(d) => {
                self.turn.push_digit(d);
            }
            InputEvent::Text(text) => {
                self.turn.push_text(&text);
            }
            InputEvent::Backspace => {
                self.turn.backspace();
            }
            InputEvent::Confirm => match self.turn.confirm() {
                Confirmed::Fire { angle, power } => self.launch(angle, power),
                Confirmed::Angle(angle) => {
                    log::debug!("{} angle set to {}", self.current_gorilla().name, angle);
                }
                Confirmed::Nothing => {}
            },
            InputEvent::Restart | InputEvent::QuitRequested => {}
        }

        Ok(EventResponse::Continue)
    }

    /// Input is only collected between shots of a live round
    fn accepts_input(&self) -> bool {
        !self.outcome.over && self.projectile.is_none()
    }

    pub fn current_gorilla(&self) -> &Gorilla {
        &self.gorillas[self.turn.current & 1]
    }

    fn launch(&mut self, angle: u32, power: u32) {
        let shooter = self.current_gorilla();
        let index = shooter.index;
        let banana = Projectile::launch(
            shooter.center(),
            angle as f32,
            power as f32,
            index,
            &self.config,
        );
        log::debug!(
            "{} throws: angle={} power={} from {:?} vel={:?}",
            shooter.name,
            angle,
            power,
            banana.pos,
            banana.vel
        );
        self.projectile = Some(banana);
        self.events.push(GameEvent::Launched {
            shooter: index,
            angle,
            power,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round::new(GameConfig::default(), 12345).unwrap()
    }

    fn type_and_confirm(round: &mut Round, digits: &str) {
        for ch in digits.chars() {
            round
                .handle_event(InputEvent::Digit(ch.to_digit(10).unwrap() as u8))
                .unwrap();
        }
        round.handle_event(InputEvent::Confirm).unwrap();
    }

    #[test]
    fn test_new_round_initial_state() {
        let round = round();
        assert_eq!(round.phase(), Phase::CollectingAngle);
        assert_eq!(round.turn().current, 0);
        assert!(round.projectile().is_none());
        assert_eq!(round.outcome(), RoundOutcome::default());
        assert_eq!(round.round_number(), 1);
    }

    #[test]
    fn test_angle_power_launches() {
        let mut round = round();
        type_and_confirm(&mut round, "45");
        assert_eq!(round.phase(), Phase::CollectingPower);
        type_and_confirm(&mut round, "70");
        assert_eq!(round.phase(), Phase::FlightInProgress);
        assert!(round.projectile().is_some());

        let events = round.drain_events();
        assert!(events.contains(&GameEvent::Launched {
            shooter: 0,
            angle: 45,
            power: 70
        }));
        assert!(round.drain_events().is_empty());
    }

    #[test]
    fn test_input_ignored_in_flight() {
        let mut round = round();
        type_and_confirm(&mut round, "45");
        type_and_confirm(&mut round, "70");
        let turn_before = round.turn().clone();

        round.handle_event(InputEvent::Digit(3)).unwrap();
        round.handle_event(InputEvent::Text("12".into())).unwrap();
        round.handle_event(InputEvent::Backspace).unwrap();
        round.handle_event(InputEvent::Confirm).unwrap();

        assert_eq!(round.turn(), &turn_before);
        assert_eq!(round.phase(), Phase::FlightInProgress);
    }

    #[test]
    fn test_quit_is_reported_in_any_phase() {
        let mut round = round();
        assert_eq!(
            round.handle_event(InputEvent::QuitRequested).unwrap(),
            EventResponse::Quit
        );
        round.outcome = RoundOutcome {
            over: true,
            winner: Some(1),
        };
        assert_eq!(
            round.handle_event(InputEvent::QuitRequested).unwrap(),
            EventResponse::Quit
        );
        assert_eq!(round.phase(), Phase::RoundOver);
    }

    #[test]
    fn test_input_ignored_after_round_over() {
        let mut round = round();
        round.outcome = RoundOutcome {
            over: true,
            winner: None,
        };
        round.turn.close();
        let before = round.turn().clone();
        round.handle_event(InputEvent::Digit(1)).unwrap();
        round.handle_event(InputEvent::Confirm).unwrap();
        assert_eq!(round.turn(), &before);
    }

    #[test]
    fn test_restart_from_round_over() {
        let mut round = round();
        round.outcome = RoundOutcome {
            over: true,
            winner: Some(0),
        };
        round.handle_event(InputEvent::Restart).unwrap();
        assert_eq!(round.phase(), Phase::CollectingAngle);
        assert_eq!(round.outcome(), RoundOutcome::default());
        assert_eq!(round.round_number(), 2);
    }
}
