//! Audio cues
//!
//! Fire-and-forget: the driver hands cues to an [`AudioSink`] and never waits
//! on playback.

use crate::core::types::ControllerKind;
use crate::simulation::events::{DuelEventLog, DuelEventType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Sword for the human, magic for the AI
    AttackSwing(ControllerKind),
    Knockout,
    BackgroundStart,
    BackgroundStop,
    /// Rewind background music to the start
    BackgroundRestart,
}

impl AudioCue {
    pub fn sound_name(self) -> &'static str {
        match self {
            AudioCue::AttackSwing(ControllerKind::Human) => "sword",
            AudioCue::AttackSwing(ControllerKind::Ai) => "magic",
            AudioCue::Knockout => "ko",
            AudioCue::BackgroundStart => "music:play",
            AudioCue::BackgroundStop => "music:pause",
            AudioCue::BackgroundRestart => "music:rewind",
        }
    }
}

/// Cues triggered by one event
pub fn cues_for_event(event: &DuelEventType) -> &'static [AudioCue] {
    match event {
        DuelEventType::AttackSwing {
            controller: ControllerKind::Human,
            ..
        } => &[AudioCue::AttackSwing(ControllerKind::Human)],
        DuelEventType::AttackSwing {
            controller: ControllerKind::Ai,
            ..
        } => &[AudioCue::AttackSwing(ControllerKind::Ai)],
        DuelEventType::FightStarted | DuelEventType::Resumed => &[AudioCue::BackgroundStart],
        DuelEventType::Paused => &[AudioCue::BackgroundStop],
        DuelEventType::RoundOver { .. } => &[AudioCue::BackgroundStop, AudioCue::Knockout],
        DuelEventType::RoundReset => &[AudioCue::BackgroundRestart],
        _ => &[],
    }
}

/// All cues of a tick, in event order
pub fn cues_for(events: &DuelEventLog) -> Vec<AudioCue> {
    events
        .iter()
        .flat_map(|event| cues_for_event(event).iter().copied())
        .collect()
}

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue (headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Records cues in order; useful in tests and for status displays
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<AudioCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Slot;
    use crate::round::RoundOutcome;

    #[test]
    fn test_swing_sound_depends_on_controller() {
        let mut log = DuelEventLog::new(1);
        log.push(DuelEventType::AttackSwing {
            slot: Slot::P1,
            controller: ControllerKind::Human,
        });
        log.push(DuelEventType::AttackSwing {
            slot: Slot::P2,
            controller: ControllerKind::Ai,
        });

        let cues = cues_for(&log);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].sound_name(), "sword");
        assert_eq!(cues[1].sound_name(), "magic");
    }

    #[test]
    fn test_knockout_stops_music_then_plays_ko() {
        let mut log = DuelEventLog::new(1);
        log.push(DuelEventType::RoundOver {
            outcome: RoundOutcome::Winner(Slot::P1),
        });
        assert_eq!(
            cues_for(&log),
            vec![AudioCue::BackgroundStop, AudioCue::Knockout]
        );
    }

    #[test]
    fn test_silent_events() {
        let mut log = DuelEventLog::new(1);
        log.push(DuelEventType::Damaged {
            slot: Slot::P2,
            health: 85,
        });
        log.push(DuelEventType::CountdownStep { value: 2 });
        assert!(cues_for(&log).is_empty());
    }
}
