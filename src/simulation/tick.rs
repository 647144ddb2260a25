//! The duel context and its per-tick loop
//!
//! `DuelSimulation` owns everything a match needs: both fighters, the intent
//! source of each slot, round state, input edge tracking and config. Nothing
//! is global, so several simulations can run side by side.

use std::time::Duration;

use crate::ai::AiController;
use crate::core::config::DuelConfig;
use crate::core::error::Result;
use crate::core::types::{CharacterKind, Slot, Tick};
use crate::fighter::{Fighter, FighterSpec, HumanController, IntentContext, IntentSource};
use crate::input::{InputFrame, InputSource, InputTracker};
use crate::round::{Phase, RoundManager};
use crate::simulation::events::{DuelEventLog, DuelEventType};

pub struct DuelSimulation {
    config: DuelConfig,
    characters: [CharacterKind; 2],
    fighters: [Fighter; 2],
    controllers: [Box<dyn IntentSource>; 2],
    round: RoundManager,
    input: InputTracker,
    tick: Tick,
}

impl DuelSimulation {
    /// Build a duel. The config is validated and each fighter takes the
    /// tuning of its slot's controller kind.
    pub fn new(
        config: DuelConfig,
        characters: [CharacterKind; 2],
        controllers: [Box<dyn IntentSource>; 2],
    ) -> Result<Self> {
        config.validate()?;

        let p1 = Fighter::new(
            FighterSpec::from_config(Slot::P1, controllers[0].kind(), characters[0], &config),
            &config,
        )?;
        let p2 = Fighter::new(
            FighterSpec::from_config(Slot::P2, controllers[1].kind(), characters[1], &config),
            &config,
        )?;

        tracing::info!(
            p1 = ?controllers[0].kind(),
            p2 = ?controllers[1].kind(),
            "duel created"
        );

        Ok(Self {
            round: RoundManager::new(config.round.clone()),
            config,
            characters,
            fighters: [p1, p2],
            controllers,
            input: InputTracker::new(),
            tick: 0,
        })
    }

    /// Human Swordsman on P1 against the AI Demon on P2
    pub fn human_vs_ai(config: DuelConfig, seed: u64) -> Result<Self> {
        let human = HumanController::new(config.physics.move_speed, seed);
        let ai = AiController::new(config.ai_policy.clone(), seed.wrapping_add(1));
        Self::new(
            config,
            [CharacterKind::Swordsman, CharacterKind::Demon],
            [Box::new(human), Box::new(ai)],
        )
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn characters(&self) -> [CharacterKind; 2] {
        self.characters
    }

    pub fn fighter(&self, slot: Slot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    pub fn fighter_mut(&mut self, slot: Slot) -> &mut Fighter {
        &mut self.fighters[slot.index()]
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn round(&self) -> &RoundManager {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Run one tick: input, fighters (P1 then P2), then round bookkeeping.
    ///
    /// `dt` is the wall-clock time this tick represents; only the countdown
    /// and the KO screen lock depend on it.
    pub fn run_tick(&mut self, input: &dyn InputSource, dt: Duration) -> DuelEventLog {
        self.tick += 1;
        let mut events = DuelEventLog::new(self.tick);

        // ===== INPUT =====
        let frame = self.input.sample(input);
        if self.round.handle_input(&frame, &mut events) {
            self.reset_fighters();
        }

        // ===== FIGHTERS =====
        let phase = self.round.phase();
        if phase.simulates() {
            let controlled = phase == Phase::Playing;
            for slot in Slot::ALL {
                self.update_fighter(slot, controlled, &frame, &mut events);
            }
        }

        // ===== ROUND =====
        let alive = [self.fighters[0].alive, self.fighters[1].alive];
        if self.round.check_round_over(alive, &mut events).is_none() {
            self.round.advance(dt, &mut events);
        }

        events
    }

    fn update_fighter(
        &mut self,
        slot: Slot,
        controlled: bool,
        frame: &InputFrame,
        events: &mut DuelEventLog,
    ) {
        let [p1, p2] = &mut self.fighters;
        let (me, opponent) = match slot {
            Slot::P1 => (p1, p2),
            Slot::P2 => (p2, p1),
        };

        let intent = (controlled && me.alive).then(|| {
            self.controllers[slot.index()].produce_intent(&IntentContext {
                me: me.view(),
                opponent: opponent.view(),
                input: frame,
            })
        });

        me.update(intent, opponent, &self.config, events);
    }

    fn reset_fighters(&mut self) {
        for fighter in &mut self.fighters {
            fighter.reset();
        }
        for controller in &mut self.controllers {
            controller.reset();
        }
    }

    /// Abandon the current round and start the next countdown immediately.
    ///
    /// Skips the KO screen lock; used by headless runs and timeouts.
    pub fn start_next_round(&mut self) -> DuelEventLog {
        let mut events = DuelEventLog::new(self.tick);
        self.reset_fighters();
        self.round.restart(&mut events);
        events
    }

    /// Whether any event of the log ended a round
    pub fn round_ended(events: &DuelEventLog) -> bool {
        events.contains(|e| matches!(e, DuelEventType::RoundOver { .. }))
    }
}
