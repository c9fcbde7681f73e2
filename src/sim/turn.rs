//! Turn and input state machine
//!
//! Collects the angle, then the power, for the gorilla whose turn it is.
//! Entries are typed one digit at a time and clamped on confirm.

use serde::{Deserialize, Serialize};

use super::actor::opponent;
use crate::consts::{MAX_ANGLE, MAX_INPUT_DIGITS, MAX_POWER, MIN_ANGLE, MIN_POWER};

/// Discrete input forwarded by the presentation shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A single digit key (main row or keypad), 0-9
    Digit(u8),
    /// Committed text from an IME/text-input source; only digits are kept
    Text(String),
    Backspace,
    Confirm,
    Restart,
    QuitRequested,
}

/// What the entry prompt is currently collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    CollectingAngle,
    CollectingPower,
    /// Nothing to collect (banana in flight, or round over)
    None,
}

/// Result of a confirm keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmed {
    /// Nothing changed (blank or unreadable entry, or not collecting)
    Nothing,
    /// Angle stored, now collecting power
    Angle(u32),
    /// Power stored; the shot is ready to throw
    Fire { angle: u32, power: u32 },
}

/// Per-round turn state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnState {
    /// Whose turn it is (0 or 1)
    pub current: usize,
    pub mode: InputMode,
    buffer: String,
    angle: Option<u32>,
    power: Option<u32>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_collecting(&self) -> bool {
        matches!(self.mode, InputMode::CollectingAngle | InputMode::CollectingPower)
    }

    /// Digits typed so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn confirmed_angle(&self) -> Option<u32> {
        self.angle
    }

    pub fn confirmed_power(&self) -> Option<u32> {
        self.power
    }

    /// Append a digit; returns whether the buffer changed
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if !self.is_collecting() || digit > 9 || self.buffer.len() >= MAX_INPUT_DIGITS {
            return false;
        }
        self.buffer.push(char::from(b'0' + digit));
        true
    }

    /// Feed committed text, keeping only ASCII digits
    pub fn push_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars() {
            if let Some(d) = ch.to_digit(10) {
                changed |= self.push_digit(d as u8);
            }
        }
        changed
    }

    pub fn backspace(&mut self) -> bool {
        if !self.is_collecting() {
            return false;
        }
        self.buffer.pop().is_some()
    }

    /// Commit the buffer for the current prompt
    pub fn confirm(&mut self) -> Confirmed {
        if !self.is_collecting() || self.buffer.is_empty() {
            return Confirmed::Nothing;
        }

        let value = match self.buffer.parse::<u32>() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Discarding unreadable entry {:?}: {}", self.buffer, e);
                self.buffer.clear();
                return Confirmed::Nothing;
            }
        };
        self.buffer.clear();

        match self.mode {
            InputMode::CollectingAngle => {
                let angle = value.clamp(MIN_ANGLE, MAX_ANGLE);
                self.angle = Some(angle);
                self.mode = InputMode::CollectingPower;
                Confirmed::Angle(angle)
            }
            InputMode::CollectingPower => {
                let power = value.clamp(MIN_POWER, MAX_POWER);
                self.power = Some(power);
                self.mode = InputMode::None;
                match self.angle {
                    Some(angle) => Confirmed::Fire { angle, power },
                    None => {
                        // Power without an angle cannot happen through confirm; start over.
                        self.mode = InputMode::CollectingAngle;
                        Confirmed::Nothing
                    }
                }
            }
            InputMode::None => Confirmed::Nothing,
        }
    }

    /// Hand the turn to the other gorilla with a clean prompt
    pub fn advance(&mut self) {
        self.current = opponent(self.current);
        self.reset_input();
    }

    /// Stop collecting input (round over)
    pub fn close(&mut self) {
        self.mode = InputMode::None;
        self.buffer.clear();
    }

    fn reset_input(&mut self) {
        self.mode = InputMode::CollectingAngle;
        self.buffer.clear();
        self.angle = None;
        self.power = None;
    }

    /// HUD prompt for the current mode (empty when not collecting)
    pub fn prompt(&self) -> String {
        match self.mode {
            InputMode::CollectingAngle => {
                format!("Angle ({}-{}): {}", MIN_ANGLE, MAX_ANGLE, self.buffer)
            }
            InputMode::CollectingPower => {
                format!("Power ({}-{}): {}", MIN_POWER, MAX_POWER, self.buffer)
            }
            InputMode::None => String::new(),
        }
    }
}
