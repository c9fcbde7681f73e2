//! Read-only view of a round for the presentation layer
//!
//! Owned and serializable, so a renderer on another thread can receive it by
//! message. The terrain grid itself is borrowed through `Round::terrain`; the
//! snapshot only carries its revision so renderers know when to re-upload.

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::state::{Phase, Round, RoundOutcome};
use super::turn::InputMode;
use crate::config::Color;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GorillaView {
    pub name: String,
    pub color: Color,
    pub top_left: IVec2,
    pub size: i32,
    pub center: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub field_width: i32,
    pub field_height: i32,
    pub terrain_revision: u64,
    pub gorillas: [GorillaView; 2],
    /// Banana center, while one is in flight
    pub banana: Option<Vec2>,
    pub wind: f32,
    /// Wind scaled for the HUD readout
    pub wind_display: f32,
    /// Wind normalized to [-1, 1] for the HUD arrow
    pub wind_indicator: f32,
    pub phase: Phase,
    pub current: usize,
    pub current_name: String,
    pub current_color: Color,
    pub input_mode: InputMode,
    pub buffer: String,
    /// Entry prompt; empty while a banana flies or once the round is over
    pub prompt: String,
    pub outcome: RoundOutcome,
    /// Headline: whose turn, or who won
    pub status: String,
}

impl Round {
    pub fn snapshot(&self) -> RoundSnapshot {
        let view = |i: usize| {
            let g = &self.gorillas[i];
            GorillaView {
                name: g.name.clone(),
                color: g.color,
                top_left: g.top_left,
                size: g.size,
                center: g.center(),
            }
        };
        let current = self.current_gorilla();
        let phase = self.phase();

        let prompt = match phase {
            Phase::CollectingAngle | Phase::CollectingPower => self.turn.prompt(),
            Phase::FlightInProgress | Phase::RoundOver => String::new(),
        };

        RoundSnapshot {
            round: self.round_number,
            field_width: self.terrain.width(),
            field_height: self.terrain.height(),
            terrain_revision: self.terrain.revision(),
            gorillas: [view(0), view(1)],
            banana: self.projectile.map(|p| p.pos),
            wind: self.wind,
            wind_display: self.config.wind_display(self.wind),
            wind_indicator: self.config.wind_indicator(self.wind),
            phase,
            current: current.index,
            current_name: current.name.clone(),
            current_color: current.color,
            input_mode: self.turn.mode,
            buffer: self.turn.buffer().to_string(),
            prompt,
            outcome: self.outcome,
            status: self.status_line(),
        }
    }

    fn status_line(&self) -> String {
        if !self.outcome.over {
            return format!("Turn: {}", self.current_gorilla().name);
        }
        match self.outcome.winner {
            Some(w) => format!("{} wins. Press R to restart", self.gorillas[w & 1].name),
            None => "Draw. Press R to restart".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::sim::state::{Phase, Round, RoundOutcome};
    use crate::sim::turn::InputEvent;

    #[test]
    fn test_snapshot_prompt_follows_input() {
        let mut round = Round::new(GameConfig::default(), 5).unwrap();
        round.handle_event(InputEvent::Digit(6)).unwrap();
        round.handle_event(InputEvent::Digit(0)).unwrap();

        let snap = round.snapshot();
        assert_eq!(snap.prompt, "Angle (0-180): 60");
        assert_eq!(snap.buffer, "60");
        assert_eq!(snap.status, "Turn: P1");
        assert_eq!(snap.current_name, "P1");
        assert!(snap.banana.is_none());
        assert!((-1.0..=1.0).contains(&snap.wind_indicator));

        round.handle_event(InputEvent::Confirm).unwrap();
        round.handle_event(InputEvent::Text("50".into())).unwrap();
        round.handle_event(InputEvent::Confirm).unwrap();
        let snap = round.snapshot();
        assert_eq!(snap.phase, Phase::FlightInProgress);
        assert_eq!(snap.prompt, "");
        assert!(snap.banana.is_some());
    }

    #[test]
    fn test_snapshot_round_over_messages() {
        let mut round = Round::new(GameConfig::default(), 5).unwrap();
        round.outcome = RoundOutcome {
            over: true,
            winner: Some(1),
        };
        assert_eq!(round.snapshot().status, "P2 wins. Press R to restart");

        round.outcome.winner = None;
        let snap = round.snapshot();
        assert_eq!(snap.status, "Draw. Press R to restart");
        assert_eq!(snap.phase, Phase::RoundOver);
    }

    #[test]
    fn test_snapshot_serializes() {
        let round = Round::new(GameConfig::default(), 5).unwrap();
        let json = serde_json::to_string(&round.snapshot()).unwrap();
        assert!(json.contains("\"current_name\":\"P1\""));
    }
}
