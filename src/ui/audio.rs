//! Audio stand-in for the terminal
//!
//! There is no sound device behind the TUI. Cues are tracked so the status
//! line can show what would be playing, and traced at debug level.

use crate::render::{AudioCue, AudioSink};

#[derive(Debug, Clone)]
pub struct TerminalAudio {
    volume: f32,
    music_playing: bool,
    last_effect: Option<AudioCue>,
}

impl TerminalAudio {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            music_playing: false,
            last_effect: None,
        }
    }

    /// One-line summary for the status bar
    pub fn status(&self) -> String {
        let music = if self.music_playing { "♪ on" } else { "♪ off" };
        match self.last_effect {
            Some(cue) => format!("{music}  last: {}  vol {:.0}%", cue.sound_name(), self.volume * 100.0),
            None => format!("{music}  vol {:.0}%", self.volume * 100.0),
        }
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: AudioCue) {
        tracing::debug!(cue = cue.sound_name(), volume = self.volume, "audio cue");
        match cue {
            AudioCue::BackgroundStart => self.music_playing = true,
            AudioCue::BackgroundStop => self.music_playing = false,
            // Rewinding does not change whether music plays
            AudioCue::BackgroundRestart => {}
            AudioCue::AttackSwing(_) | AudioCue::Knockout => self.last_effect = Some(cue),
        }
    }
}
