//! The frame driver
//!
//! One call to [`FrameDriver::frame`] is one pass of the loop: run the
//! simulation tick, turn its events into audio cues and HUD updates, then
//! draw background, fighters and the phase overlay.

use std::time::Duration;

use crate::core::config::RenderConfig;
use crate::core::error::Result;
use crate::core::types::Slot;
use crate::input::InputSource;
use crate::render::audio::{cues_for, AudioSink};
use crate::render::colors::HealthBand;
use crate::render::sprites::{SpriteFrame, SpriteLibrary};
use crate::render::Presentation;
use crate::round::{Phase, RoundManager};
use crate::simulation::{DuelEventLog, DuelEventType, DuelSimulation};

/// Phase-specific overlay for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    None,
    Countdown(u8),
    /// Progress in [0, 1]; the banner grows with it
    FightBanner { progress: f32 },
    Paused,
    RoundOver,
}

impl Overlay {
    pub fn for_round(round: &RoundManager) -> Self {
        match round.phase() {
            Phase::Countdown => match round.banner_progress() {
                Some(progress) => Overlay::FightBanner { progress },
                None => Overlay::Countdown(round.countdown_value()),
            },
            Phase::Playing => Overlay::None,
            Phase::Paused => Overlay::Paused,
            Phase::RoundOver => Overlay::RoundOver,
        }
    }
}

pub struct FrameDriver {
    sprites: SpriteLibrary,
    show_hitboxes: bool,
    skipped_draws: u64,
}

impl FrameDriver {
    pub fn new(sprites: SpriteLibrary, render: &RenderConfig) -> Self {
        Self {
            sprites,
            show_hitboxes: render.show_hitboxes,
            skipped_draws: 0,
        }
    }

    pub fn sprites_mut(&mut self) -> &mut SpriteLibrary {
        &mut self.sprites
    }

    /// Draw calls skipped so far because a sheet was not ready
    pub fn skipped_draws(&self) -> u64 {
        self.skipped_draws
    }

    /// Push the full HUD state, e.g. before the first frame
    pub fn sync(&self, sim: &DuelSimulation, presentation: &mut dyn Presentation) {
        let scores = sim.round().scores();
        for slot in Slot::ALL {
            let health = sim.fighter(slot).health;
            presentation.set_health_display(slot, health, HealthBand::for_health(health));
            presentation.set_score_display(slot, scores.get(slot));
        }
        match sim.round().outcome() {
            Some(outcome) => presentation.show_result_screen(&outcome.announcement(sim.characters())),
            None => presentation.hide_result_screen(),
        }
    }

    /// Run one full loop iteration
    pub fn frame(
        &mut self,
        sim: &mut DuelSimulation,
        input: &dyn InputSource,
        dt: Duration,
        presentation: &mut dyn Presentation,
        audio: &mut dyn AudioSink,
    ) -> Result<DuelEventLog> {
        let events = sim.run_tick(input, dt);
        self.dispatch(&events, sim, presentation, audio);
        self.draw(sim, &events, presentation);
        presentation.finish_frame()?;
        Ok(events)
    }

    /// Audio cues and HUD updates for a tick's events
    pub fn dispatch(
        &self,
        events: &DuelEventLog,
        sim: &DuelSimulation,
        presentation: &mut dyn Presentation,
        audio: &mut dyn AudioSink,
    ) {
        for cue in cues_for(events) {
            audio.play(cue);
        }

        for event in events.iter() {
            match event {
                DuelEventType::Damaged { slot, health } => {
                    presentation.set_health_display(*slot, *health, HealthBand::for_health(*health));
                }
                DuelEventType::ScoreChanged { slot, score } => {
                    presentation.set_score_display(*slot, *score);
                }
                DuelEventType::RoundOver { outcome } => {
                    presentation.show_result_screen(&outcome.announcement(sim.characters()));
                }
                DuelEventType::RoundReset => {
                    presentation.hide_result_screen();
                    for slot in Slot::ALL {
                        let health = sim.fighter(slot).health;
                        presentation.set_health_display(slot, health, HealthBand::for_health(health));
                    }
                }
                _ => {}
            }
        }
    }

    /// Paint the current state
    pub fn draw(
        &mut self,
        sim: &DuelSimulation,
        events: &DuelEventLog,
        presentation: &mut dyn Presentation,
    ) {
        presentation.render_background(&sim.config().arena);

        for fighter in sim.fighters() {
            let manifest = self.sprites.manifest(fighter.slot);
            if !manifest.is_ready(fighter.action()) {
                // Not loaded yet; try again next tick
                self.skipped_draws += 1;
                continue;
            }
            presentation.render_sprite(&SpriteFrame::place(fighter, &sim.config().render));
        }

        if self.show_hitboxes {
            for fighter in sim.fighters() {
                presentation.render_hitbox(fighter.slot, fighter.body_rect());
            }
            for event in events.iter() {
                if let DuelEventType::StrikeChecked { attacker, strike, .. } = event {
                    presentation.render_hitbox(*attacker, *strike);
                }
            }
        }

        presentation.render_overlay(&Overlay::for_round(sim.round()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DuelConfig;
    use crate::core::types::{CharacterKind, Rect};
    use crate::fighter::Action;
    use crate::input::{ActionSet, LogicalAction};
    use crate::render::audio::{AudioCue, RecordingAudio};
    use std::path::Path;

    #[derive(Default)]
    struct RecordingPresentation {
        sprites: Vec<SpriteFrame>,
        hitboxes: Vec<Rect>,
        overlays: Vec<Overlay>,
        health: [Option<(u8, HealthBand)>; 2],
        scores: [u32; 2],
        result: Option<String>,
        frames: u32,
    }

    impl Presentation for RecordingPresentation {
        fn render_background(&mut self, _arena: &crate::core::config::ArenaConfig) {
            self.sprites.clear();
            self.hitboxes.clear();
        }

        fn render_sprite(&mut self, sprite: &SpriteFrame) {
            self.sprites.push(sprite.clone());
        }

        fn render_hitbox(&mut self, _slot: Slot, rect: Rect) {
            self.hitboxes.push(rect);
        }

        fn render_overlay(&mut self, overlay: &Overlay) {
            self.overlays.push(*overlay);
        }

        fn set_health_display(&mut self, slot: Slot, health: u8, band: HealthBand) {
            self.health[slot.index()] = Some((health, band));
        }

        fn set_score_display(&mut self, slot: Slot, score: u32) {
            self.scores[slot.index()] = score;
        }

        fn show_result_screen(&mut self, winner_label: &str) {
            self.result = Some(winner_label.to_string());
        }

        fn hide_result_screen(&mut self) {
            self.result = None;
        }

        fn finish_frame(&mut self) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    const CHARACTERS: [CharacterKind; 2] = [CharacterKind::Swordsman, CharacterKind::Demon];

    fn setup(ready: bool) -> (DuelSimulation, FrameDriver) {
        let config = DuelConfig::default();
        let sprites = if ready {
            SpriteLibrary::placeholder(CHARACTERS)
        } else {
            SpriteLibrary::new(CHARACTERS, Path::new("missing"))
        };
        let driver = FrameDriver::new(sprites, &config.render);
        let sim = DuelSimulation::human_vs_ai(config, 5).unwrap();
        (sim, driver)
    }

    #[test]
    fn test_countdown_overlay_and_sprites() {
        let (mut sim, mut driver) = setup(true);
        let mut screen = RecordingPresentation::default();
        let mut audio = RecordingAudio::default();

        driver
            .frame(&mut sim, &ActionSet::empty(), Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();
        assert_eq!(screen.sprites.len(), 2);
        assert_eq!(screen.overlays.last(), Some(&Overlay::Countdown(3)));
        assert_eq!(screen.frames, 1);
    }

    #[test]
    fn test_unready_sheets_skip_draw() {
        let (mut sim, mut driver) = setup(false);
        let mut screen = RecordingPresentation::default();
        let mut audio = RecordingAudio::default();

        driver
            .frame(&mut sim, &ActionSet::empty(), Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();
        assert!(screen.sprites.is_empty());
        assert_eq!(driver.skipped_draws(), 2);

        // Once ready, the same fighter draws on the next tick
        driver.sprites_mut().manifest_mut(Slot::P1).mark_ready(Action::Idle);
        driver
            .frame(&mut sim, &ActionSet::empty(), Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();
        assert_eq!(screen.sprites.len(), 1);
        assert_eq!(screen.sprites[0].slot, Slot::P1);
    }

    #[test]
    fn test_fight_start_plays_music_and_hides_overlay() {
        let (mut sim, mut driver) = setup(true);
        let mut screen = RecordingPresentation::default();
        let mut audio = RecordingAudio::default();
        let none = ActionSet::empty();

        while sim.phase() != Phase::Playing {
            driver
                .frame(&mut sim, &none, Duration::from_secs(1), &mut screen, &mut audio)
                .unwrap();
        }
        assert!(audio.cues.contains(&AudioCue::BackgroundStart));
        assert!(screen
            .overlays
            .iter()
            .any(|o| matches!(o, Overlay::FightBanner { .. })));

        driver
            .frame(&mut sim, &none, Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();
        assert_eq!(screen.overlays.last(), Some(&Overlay::None));
    }

    #[test]
    fn test_knockout_updates_hud() {
        let (mut sim, mut driver) = setup(true);
        let mut screen = RecordingPresentation::default();
        let mut audio = RecordingAudio::default();
        let none = ActionSet::empty();
        driver.sync(&sim, &mut screen);
        assert_eq!(screen.health[0], Some((100, HealthBand::Healthy)));

        while sim.phase() != Phase::Playing {
            driver
                .frame(&mut sim, &none, Duration::from_secs(1), &mut screen, &mut audio)
                .unwrap();
        }
        sim.fighter_mut(Slot::P2).alive = false;
        driver
            .frame(&mut sim, &none, Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();

        assert_eq!(screen.result.as_deref(), Some("Swordsman Wins!"));
        assert_eq!(screen.scores, [1, 0]);
        assert_eq!(screen.overlays.last(), Some(&Overlay::RoundOver));
        assert!(audio.cues.ends_with(&[AudioCue::BackgroundStop, AudioCue::Knockout]));

        // Reset after the lock clears the result screen
        driver
            .frame(&mut sim, &none, Duration::from_secs(2), &mut screen, &mut audio)
            .unwrap();
        driver
            .frame(
                &mut sim,
                &ActionSet::of(&[LogicalAction::Confirm]),
                Duration::from_millis(16),
                &mut screen,
                &mut audio,
            )
            .unwrap();
        assert_eq!(screen.result, None);
        assert_eq!(screen.health[1], Some((100, HealthBand::Healthy)));
        assert_eq!(audio.cues.last(), Some(&AudioCue::BackgroundRestart));
    }

    #[test]
    fn test_hitboxes_only_when_enabled() {
        let config = DuelConfig {
            render: RenderConfig {
                show_hitboxes: true,
                ..RenderConfig::default()
            },
            ..DuelConfig::default()
        };
        let mut driver = FrameDriver::new(
            SpriteLibrary::placeholder(CHARACTERS),
            &config.render,
        );
        let mut sim = DuelSimulation::human_vs_ai(config, 5).unwrap();
        let mut screen = RecordingPresentation::default();
        let mut audio = RecordingAudio::default();

        driver
            .frame(&mut sim, &ActionSet::empty(), Duration::from_millis(16), &mut screen, &mut audio)
            .unwrap();
        assert_eq!(screen.hitboxes.len(), 2);
    }
}
