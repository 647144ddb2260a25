//! Events produced during a tick
//!
//! The simulation never calls audio or presentation code directly. It records
//! what happened; the frame driver turns the log into cues and display updates.

use crate::core::types::{ControllerKind, Rect, Slot, Tick};
use crate::round::{Phase, RoundOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct DuelEvent {
    pub tick: Tick,
    pub event_type: DuelEventType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DuelEventType {
    AttackSwing {
        slot: Slot,
        controller: ControllerKind,
    },
    /// A swing's strike box was tested against the opponent's body
    StrikeChecked {
        attacker: Slot,
        strike: Rect,
        landed: bool,
    },
    Damaged {
        slot: Slot,
        health: u8,
    },
    Died {
        slot: Slot,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    CountdownStep {
        value: u8,
    },
    FightStarted,
    Paused,
    Resumed,
    RoundOver {
        outcome: RoundOutcome,
    },
    ScoreChanged {
        slot: Slot,
        score: u32,
    },
    RoundReset,
}

/// Log of events from a single tick
#[derive(Debug, Clone, Default)]
pub struct DuelEventLog {
    pub tick: Tick,
    pub events: Vec<DuelEvent>,
}

impl DuelEventLog {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event_type: DuelEventType) {
        self.events.push(DuelEvent {
            tick: self.tick,
            event_type,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuelEventType> {
        self.events.iter().map(|e| &e.event_type)
    }

    pub fn contains(&self, predicate: impl Fn(&DuelEventType) -> bool) -> bool {
        self.iter().any(predicate)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
