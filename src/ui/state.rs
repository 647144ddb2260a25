//! Scene state accumulated between terminal redraws

use std::collections::VecDeque;

use crate::core::config::ArenaConfig;
use crate::core::types::{Rect, Slot, Tick};
use crate::render::{HealthBand, Overlay, SpriteFrame};
use crate::round::RoundOutcome;
use crate::simulation::{DuelEventLog, DuelEventType};

/// Maximum combat log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// An entry in the combat log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Combat,
    Round,
    System,
}

/// Everything the next redraw shows
#[derive(Debug, Clone)]
pub struct Scene {
    pub arena: ArenaConfig,
    pub sprites: Vec<SpriteFrame>,
    pub hitboxes: Vec<(Slot, Rect)>,
    pub overlay: Overlay,
    pub health: [(u8, HealthBand); 2],
    pub scores: [u32; 2],
    pub names: [String; 2],
    pub result: Option<String>,
    /// Bottom line: last audio cue, key hints
    pub status: String,
    pub log: VecDeque<LogEntry>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            sprites: Vec::new(),
            hitboxes: Vec::new(),
            overlay: Overlay::None,
            health: [(100, HealthBand::Healthy); 2],
            scores: [0; 2],
            names: [String::from("P1"), String::from("P2")],
            result: None,
            status: String::new(),
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }
}

impl Scene {
    pub fn new(names: [String; 2]) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// Add an entry to the combat log
    pub fn log(&mut self, tick: Tick, message: String, category: LogCategory) {
        if self.log.len() >= MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }

    /// Log the noteworthy events of a tick
    pub fn record(&mut self, events: &DuelEventLog) {
        for event in events.iter() {
            if let Some((message, category)) = self.describe(event) {
                self.log(events.tick, message, category);
            }
        }
    }

    fn name(&self, slot: Slot) -> &str {
        &self.names[slot.index()]
    }

    fn describe(&self, event: &DuelEventType) -> Option<(String, LogCategory)> {
        let entry = match event {
            DuelEventType::Damaged { slot, health } => (
                format!("{} hit, {} health left", self.name(*slot), health),
                LogCategory::Combat,
            ),
            DuelEventType::Died { slot } => {
                (format!("{} is down", self.name(*slot)), LogCategory::Combat)
            }
            DuelEventType::FightStarted => ("FIGHT!".to_string(), LogCategory::Round),
            DuelEventType::RoundOver { outcome } => {
                let message = match outcome {
                    RoundOutcome::Winner(slot) => format!("{} wins the round", self.name(*slot)),
                    RoundOutcome::Draw => "Double KO".to_string(),
                };
                (message, LogCategory::Round)
            }
            DuelEventType::Paused => ("Paused".to_string(), LogCategory::System),
            DuelEventType::Resumed => ("Resumed".to_string(), LogCategory::System),
            DuelEventType::RoundReset => ("New round".to_string(), LogCategory::Round),
            _ => return None,
        };
        Some(entry)
    }

    /// Most recent entries, newest last
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().skip(self.log.len().saturating_sub(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new([String::from("Swordsman"), String::from("Demon")])
    }

    #[test]
    fn test_log_is_bounded() {
        let mut scene = scene();
        for tick in 0..(MAX_LOG_ENTRIES as u64 + 10) {
            scene.log(tick, format!("entry {tick}"), LogCategory::System);
        }
        assert_eq!(scene.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(scene.log.front().map(|e| e.tick), Some(10));
    }

    #[test]
    fn test_records_combat_events() {
        let mut scene = scene();
        let mut events = DuelEventLog::new(42);
        events.push(DuelEventType::Damaged {
            slot: Slot::P2,
            health: 85,
        });
        events.push(DuelEventType::CountdownStep { value: 1 });
        scene.record(&events);

        assert_eq!(scene.log.len(), 1);
        let entry = &scene.log[0];
        assert_eq!(entry.tick, 42);
        assert_eq!(entry.message, "Demon hit, 85 health left");
        assert_eq!(entry.category, LogCategory::Combat);
    }

    #[test]
    fn test_recent_returns_tail() {
        let mut scene = scene();
        for tick in 0..5 {
            scene.log(tick, String::new(), LogCategory::System);
        }
        let ticks: Vec<Tick> = scene.recent(2).map(|e| e.tick).collect();
        assert_eq!(ticks, vec![3, 4]);
    }
}
