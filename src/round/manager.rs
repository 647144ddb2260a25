//! Round lifecycle: countdown, fight banner, play, pause, KO and reset

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::RoundConfig;
use crate::core::types::{CharacterKind, Slot};
use crate::input::{InputFrame, LogicalAction};
use crate::simulation::events::{DuelEventLog, DuelEventType};

/// Game phase. The FIGHT! banner is the tail of `Countdown` (value 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Countdown,
    Playing,
    Paused,
    RoundOver,
}

impl Phase {
    /// Whether fighters integrate physics this tick
    pub fn simulates(self) -> bool {
        matches!(self, Phase::Playing | Phase::RoundOver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Winner(Slot),
    /// Both fighters died on the same tick
    Draw,
}

impl RoundOutcome {
    /// Result-screen text, e.g. "Demon Wins!"
    pub fn announcement(&self, characters: [CharacterKind; 2]) -> String {
        match self {
            RoundOutcome::Winner(slot) => {
                format!("{} Wins!", characters[slot.index()].display_name())
            }
            RoundOutcome::Draw => "Double KO!".to_string(),
        }
    }
}

/// Per-slot win tally. Persists across round resets; never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores([u32; 2]);

impl Scores {
    pub fn get(&self, slot: Slot) -> u32 {
        self.0[slot.index()]
    }

    fn increment(&mut self, slot: Slot) -> u32 {
        let score = &mut self.0[slot.index()];
        *score += 1;
        *score
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Owns the phase, countdown timers and score tally
#[derive(Debug, Clone)]
pub struct RoundManager {
    config: RoundConfig,
    phase: Phase,
    countdown_value: u8,
    countdown_elapsed: Duration,
    /// Some while the FIGHT! banner is showing
    banner_ticks: Option<u32>,
    /// Time spent on the KO screen
    round_over_elapsed: Duration,
    outcome: Option<RoundOutcome>,
    scores: Scores,
    round: u32,
}

impl RoundManager {
    pub fn new(config: RoundConfig) -> Self {
        let countdown_value = config.countdown_from;
        Self {
            config,
            phase: Phase::Countdown,
            countdown_value,
            countdown_elapsed: Duration::ZERO,
            banner_ticks: if countdown_value == 0 { Some(0) } else { None },
            round_over_elapsed: Duration::ZERO,
            outcome: None,
            scores: Scores::default(),
            round: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn countdown_value(&self) -> u8 {
        self.countdown_value
    }

    /// FIGHT! banner progress in [0, 1], if the banner is up
    pub fn banner_progress(&self) -> Option<f32> {
        let ticks = self.banner_ticks?;
        let total = self.config.fight_banner_ticks.max(1);
        Some((ticks as f32 / total as f32).min(1.0))
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Outcome of the finished round, while its KO screen is up
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// 1-based number of the round in progress
    pub fn round_number(&self) -> u32 {
        self.round
    }

    /// Whether confirm would reset the round right now
    pub fn can_reset(&self) -> bool {
        self.phase == Phase::RoundOver
            && self.round_over_elapsed >= Duration::from_millis(self.config.reset_delay_ms)
    }

    fn transition(&mut self, to: Phase, events: &mut DuelEventLog) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::info!(?from, ?to, round = self.round, "phase change");
        events.push(DuelEventType::PhaseChanged { from, to });
    }

    /// Apply pause, resume and reset presses.
    ///
    /// Returns true when the caller should restore the fighters for a new
    /// round; the manager has already re-entered the countdown.
    pub fn handle_input(&mut self, input: &InputFrame, events: &mut DuelEventLog) -> bool {
        match self.phase {
            Phase::Playing if input.just_pressed(LogicalAction::Pause) => {
                self.transition(Phase::Paused, events);
                events.push(DuelEventType::Paused);
                false
            }
            Phase::Paused if input.just_pressed(LogicalAction::Confirm) => {
                self.transition(Phase::Playing, events);
                events.push(DuelEventType::Resumed);
                false
            }
            Phase::RoundOver if input.just_pressed(LogicalAction::Confirm) => {
                if !self.can_reset() {
                    tracing::debug!(
                        elapsed_ms = self.round_over_elapsed.as_millis() as u64,
                        "reset ignored, KO screen still locked"
                    );
                    return false;
                }
                self.restart(events);
                true
            }
            _ => false,
        }
    }

    /// Advance phase timers by one tick of `dt`
    pub fn advance(&mut self, dt: Duration, events: &mut DuelEventLog) {
        match self.phase {
            Phase::Countdown => self.advance_countdown(dt, events),
            Phase::RoundOver => self.round_over_elapsed += dt,
            Phase::Playing | Phase::Paused => {}
        }
    }

    fn advance_countdown(&mut self, dt: Duration, events: &mut DuelEventLog) {
        if let Some(ticks) = self.banner_ticks.as_mut() {
            *ticks += 1;
            if *ticks >= self.config.fight_banner_ticks {
                self.banner_ticks = None;
                self.transition(Phase::Playing, events);
                events.push(DuelEventType::FightStarted);
            }
            return;
        }

        self.countdown_elapsed += dt;
        if self.countdown_elapsed >= Duration::from_millis(self.config.countdown_step_ms) {
            self.countdown_elapsed = Duration::ZERO;
            self.countdown_value = self.countdown_value.saturating_sub(1);
            events.push(DuelEventType::CountdownStep {
                value: self.countdown_value,
            });
            if self.countdown_value == 0 {
                self.banner_ticks = Some(0);
            }
        }
    }

    /// End the round if either fighter is dead. Only acts while playing.
    pub fn check_round_over(
        &mut self,
        alive: [bool; 2],
        events: &mut DuelEventLog,
    ) -> Option<RoundOutcome> {
        if self.phase != Phase::Playing {
            return None;
        }

        let outcome = match alive {
            [true, true] => return None,
            [false, false] => RoundOutcome::Draw,
            [true, false] => RoundOutcome::Winner(Slot::P1),
            [false, true] => RoundOutcome::Winner(Slot::P2),
        };

        self.outcome = Some(outcome);
        self.round_over_elapsed = Duration::ZERO;
        self.transition(Phase::RoundOver, events);
        events.push(DuelEventType::RoundOver { outcome });

        if let RoundOutcome::Winner(slot) = outcome {
            let score = self.scores.increment(slot);
            events.push(DuelEventType::ScoreChanged { slot, score });
        }
        tracing::info!(round = self.round, ?outcome, scores = ?self.scores, "round over");

        Some(outcome)
    }

    /// Re-enter the countdown for the next round. Scores are kept.
    pub fn restart(&mut self, events: &mut DuelEventLog) {
        self.countdown_value = self.config.countdown_from;
        self.countdown_elapsed = Duration::ZERO;
        self.banner_ticks = if self.countdown_value == 0 { Some(0) } else { None };
        self.round_over_elapsed = Duration::ZERO;
        self.outcome = None;
        self.round += 1;
        self.transition(Phase::Countdown, events);
        events.push(DuelEventType::RoundReset);
    }
}
