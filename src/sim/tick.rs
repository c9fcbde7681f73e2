//! Simulation tick
//!
//! Advances the banana and resolves whatever it hits. The fixed-step
//! accumulator lives here too, so shells with a variable frame rate still
//! feed the engine identical steps.

use glam::IVec2;

use super::actor::opponent;
use super::collision::{self, Impact};
use super::state::{EndReason, GameEvent, Round, RoundOutcome};
use crate::consts::*;

impl Round {
    /// Advance the banana by `dt` seconds
    ///
    /// No-op unless a banana is in flight and the round is still being
    /// played. A `dt` that is zero, negative or not finite is ignored.
    pub fn tick(&mut self, dt: f32) {
        if self.outcome.over || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let Some(mut banana) = self.projectile else {
            return;
        };

        banana.integrate(dt, self.wind, self.config.gravity);
        self.projectile = Some(banana);
        self.time_ticks += 1;

        match collision::detect(&banana, &self.gorillas, &self.terrain, &self.config) {
            Impact::None => {}
            Impact::OutOfBounds => {
                log::debug!("Banana left the field at {:?}", banana.pos);
                self.events.push(GameEvent::ShotMissed {
                    shooter: self.turn.current,
                });
                self.end_shot();
            }
            Impact::Gorilla { index, at } => {
                log::debug!("Direct hit on {} at {:?}", self.gorillas[index].name, at);
                self.explode(at);
                self.finish(Some(opponent(index)), EndReason::DirectHit);
            }
            Impact::Terrain { at } => {
                self.explode(at);
                let caught = collision::blast_victims(at, self.config.explosion_radius, &self.gorillas);
                match caught {
                    [false, false] => self.end_shot(),
                    [true, false] => self.finish(Some(1), EndReason::Blast),
                    [false, true] => self.finish(Some(0), EndReason::Blast),
                    // both caught: nobody wins
                    [true, true] => self.finish(None, EndReason::Blast),
                }
            }
        }
    }

    /// Step until the current shot resolves, at most `max_ticks` steps
    ///
    /// Returns the number of steps taken.
    pub fn run_until_resolved(&mut self, dt: f32, max_ticks: u32) -> u32 {
        let mut steps = 0;
        while steps < max_ticks && self.projectile.is_some() && !self.outcome.over {
            self.tick(dt);
            steps += 1;
        }
        steps
    }

    fn explode(&mut self, at: IVec2) {
        let radius = self.config.explosion_radius;
        let cleared = self.terrain.erase_circle(at, radius);
        self.events.push(GameEvent::Explosion {
            center: at,
            radius,
            cleared,
        });
    }

    /// Non-terminal resolution: drop the banana, hand over the turn
    fn end_shot(&mut self) {
        self.projectile = None;
        self.turn.advance();
        log::debug!("Turn passes to {}", self.current_gorilla().name);
        self.events.push(GameEvent::TurnChanged {
            current: self.turn.current,
        });
    }

    fn finish(&mut self, winner: Option<usize>, reason: EndReason) {
        self.projectile = None;
        self.turn.close();
        self.outcome = RoundOutcome { over: true, winner };
        match winner {
            Some(w) => log::info!("Round {} won by {} ({:?})", self.round_number, self.gorillas[w].name, reason),
            None => log::info!("Round {} drawn ({:?})", self.round_number, reason),
        }
        self.events.push(GameEvent::RoundOver { winner, reason });
    }
}

/// Converts variable frame time into fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time; returns the number of steps run
    pub fn advance(&mut self, round: &mut Round, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            round.tick(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        self.accumulator = self.accumulator.min(SIM_DT);
        substeps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::projectile::Projectile;
    use crate::sim::round::Layout;
    use crate::sim::state::Phase;
    use crate::sim::terrain::Building;
    use crate::sim::turn::{InputEvent, InputMode};

    /// Flat skyline 200 px tall with gorillas far apart on it
    fn flat_round(wind: f32) -> Round {
        let config = GameConfig::default();
        let h = config.field_height;
        let ground = Building::grounded(0, config.field_width, 200, h);
        let layout = Layout {
            buildings: vec![ground],
            spawns: [
                Building::grounded(100, 40, 200, h),
                Building::grounded(900, 40, 200, h),
            ],
            wind,
        };
        Round::from_layout(config, 1, &layout).unwrap()
    }

    fn throw_from(round: &mut Round, from: Vec2, angle: f32, power: f32) {
        let banana = Projectile::launch(from, angle, power, 0, &round.config);
        round.turn.mode = InputMode::None;
        round.projectile = Some(banana);
    }

    #[test]
    fn test_tick_noop_without_banana() {
        let mut round = flat_round(0.0);
        round.tick(SIM_DT);
        assert_eq!(round.time_ticks(), 0);
        assert_eq!(round.phase(), Phase::CollectingAngle);
    }

    #[test]
    fn test_vertical_throw_lands_near_launch_and_turn_flips() {
        let mut round = flat_round(0.0);
        round.drain_events();
        let start = Vec2::new(500.0, 350.0);
        throw_from(&mut round, start, 90.0, 50.0);

        let mut apex = start.y;
        let mut last = start;
        while round.projectile.is_some() {
            let p = round.projectile.unwrap();
            apex = apex.min(p.pos.y);
            last = p.pos;
            round.tick(SIM_DT);
            assert!(round.time_ticks() < 10_000);
        }

        assert!(apex < start.y - 100.0, "banana should rise first");
        assert!((last.x - start.x).abs() < 2.0);
        assert!(!round.terrain().is_solid(500, 400));
        assert_eq!(round.outcome(), RoundOutcome::default());
        assert_eq!(round.turn().current, 1);
        assert_eq!(round.phase(), Phase::CollectingAngle);

        let events = round.drain_events();
        assert!(matches!(events[0], GameEvent::Explosion { cleared, .. } if cleared > 0));
        assert_eq!(events[1], GameEvent::TurnChanged { current: 1 });
    }

    #[test]
    fn test_blast_catches_nearby_gorilla() {
        let mut round = flat_round(0.0);
        let target = round.gorillas[1].center();
        // drop straight onto the roof beside the right gorilla, outside its hit circle
        throw_from(&mut round, Vec2::new(target.x + 30.0, target.y - 20.0), 270.0, 1.0);
        round.run_until_resolved(SIM_DT, 1000);

        assert_eq!(
            round.outcome(),
            RoundOutcome {
                over: true,
                winner: Some(0)
            }
        );
        assert_eq!(round.phase(), Phase::RoundOver);
        assert!(round.projectile().is_none());
    }

    #[test]
    fn test_blast_reaching_both_is_draw() {
        let mut round = flat_round(0.0);
        let left = round.gorillas[0].center();
        let right = round.gorillas[1].center();
        round.config.explosion_radius = right.x - left.x;
        let mid = Vec2::new((left.x + right.x) / 2.0, left.y);
        throw_from(&mut round, mid, 270.0, 1.0);
        round.run_until_resolved(SIM_DT, 1000);

        assert_eq!(
            round.outcome(),
            RoundOutcome {
                over: true,
                winner: None
            }
        );
        let events = round.drain_events();
        assert!(events.contains(&GameEvent::RoundOver {
            winner: None,
            reason: EndReason::Blast
        }));
    }

    #[test]
    fn test_out_of_bounds_is_clean_miss() {
        let mut round = flat_round(0.0);
        let revision = round.terrain().revision();
        throw_from(&mut round, Vec2::new(1000.0, 100.0), 0.0, 100.0);
        round.run_until_resolved(SIM_DT, 1000);

        assert_eq!(round.terrain().revision(), revision);
        assert_eq!(round.outcome(), RoundOutcome::default());
        assert_eq!(round.turn().current, 1);
        assert!(round.drain_events().contains(&GameEvent::ShotMissed { shooter: 0 }));
    }

    #[test]
    fn test_fixed_stepper_caps_substeps() {
        let mut round = flat_round(0.0);
        round.handle_event(InputEvent::Text("45".into())).unwrap();
        round.handle_event(InputEvent::Confirm).unwrap();
        round.handle_event(InputEvent::Text("10".into())).unwrap();
        round.handle_event(InputEvent::Confirm).unwrap();
        assert_eq!(round.phase(), Phase::FlightInProgress);

        let mut stepper = FixedStepper::new();
        assert_eq!(stepper.advance(&mut round, SIM_DT * 0.5), 0);
        assert_eq!(stepper.advance(&mut round, SIM_DT * 0.6), 1);
        assert_eq!(stepper.advance(&mut round, 5.0), MAX_SUBSTEPS);
        assert!(stepper.alpha() <= 1.0);
    }

    #[test]
    fn test_bad_dt_leaves_banana_untouched() {
        let mut round = flat_round(0.0);
        throw_from(&mut round, Vec2::new(500.0, 350.0), 45.0, 50.0);
        let before = round.projectile;

        for dt in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0, -SIM_DT] {
            round.tick(dt);
        }
        assert_eq!(round.projectile, before);
        assert_eq!(round.time_ticks(), 0);

        round.tick(SIM_DT);
        assert_eq!(round.time_ticks(), 1);
        assert!(round.projectile.is_some_and(|p| p.pos.is_finite()));
    }

    #[test]
    fn test_banana_alive_until_dropped() {
        let mut round = flat_round(0.0);
        throw_from(&mut round, Vec2::new(500.0, 350.0), 90.0, 30.0);

        while let Some(banana) = round.projectile {
            assert!(banana.alive);
            assert_eq!(round.snapshot().banana, Some(banana.pos));
            round.tick(SIM_DT);
            assert!(round.time_ticks() < 10_000);
        }
        assert_eq!(round.snapshot().banana, None);
    }
}

