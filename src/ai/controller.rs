//! Scripted AI policy
//!
//! A timer-gated finite policy: every `decision_interval` ticks the mode is
//! re-chosen from health and distance, and each tick the mode maps the
//! distance band to movement and a chance to attack.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai::tuning::AiTuning;
use crate::core::types::ControllerKind;
use crate::fighter::intent::{AttackKind, FighterView, Intent, IntentContext, IntentSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMode {
    #[default]
    Neutral,
    Aggressive,
    Defensive,
}

/// Decision policy bound to one AI-controlled fighter
#[derive(Debug, Clone)]
pub struct AiController {
    tuning: AiTuning,
    rng: ChaCha8Rng,
    kind: ControllerKind,
    pub mode: AiMode,
    pub decision_timer: u32,
    pub idle_timer: u32,
    pub move_timer: u32,
    /// -1, 0 or 1; only updated every `direction_interval` ticks
    pub last_direction: f32,
    /// Attack cooldown seen last tick; a rise means a swing started
    last_cooldown: u32,
}

impl AiController {
    pub fn new(tuning: AiTuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            kind: ControllerKind::Ai,
            mode: AiMode::Neutral,
            decision_timer: 0,
            idle_timer: 0,
            move_timer: 0,
            last_direction: 0.0,
            last_cooldown: 0,
        }
    }

    /// Drive a fighter that uses another controller's tuning (AI-vs-AI runs)
    pub fn driving(mut self, kind: ControllerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mode for the given own health and distance to the opponent
    pub fn choose_mode(&self, health: u8, distance: f32) -> AiMode {
        if health < self.tuning.defensive_below_health {
            AiMode::Defensive
        } else if distance < self.tuning.aggressive_within
            && health > self.tuning.aggressive_above_health
        {
            AiMode::Aggressive
        } else {
            AiMode::Neutral
        }
    }

    fn aggressive(&mut self, me: &FighterView, opponent: &FighterView, intent: &mut Intent) {
        let cfg = &self.tuning.aggressive;
        let distance = me.distance_to(opponent);

        if distance > self.tuning.attack_range {
            // Keep heading the same way between direction decisions
            if self.move_timer > self.tuning.direction_interval {
                self.last_direction = me.direction_to(opponent);
                self.move_timer = 0;
            }
            intent.move_velocity = self.last_direction * cfg.far_speed;
        } else if distance > self.tuning.comfortable_range {
            intent.move_velocity = me.direction_to(opponent) * cfg.approach_speed;
        } else {
            self.idle_timer += 1;
            if self.idle_timer > cfg.dwell_ticks
                && me.attack_cooldown == 0
                && me.vertical_gap(opponent) < cfg.max_vertical_gap
                && self.rng.gen_bool(cfg.attack_chance)
            {
                intent.attack = Some(AttackKind::roll(&mut self.rng, cfg.primary_attack_bias));
            }
        }

        if intent.move_velocity != 0.0 && !me.is_jumping && self.rng.gen_bool(cfg.jump_chance) {
            intent.jump = true;
        }
    }

    fn defensive(&mut self, me: &FighterView, opponent: &FighterView, intent: &mut Intent) {
        let cfg = &self.tuning.defensive;
        let distance = me.distance_to(opponent);

        if distance < cfg.retreat_distance {
            intent.move_velocity = -me.direction_to(opponent) * cfg.retreat_speed;
        }

        if distance < self.tuning.attack_range
            && me.attack_cooldown == 0
            && self.rng.gen_bool(cfg.attack_chance)
        {
            intent.attack = Some(AttackKind::Primary);
        }
    }

    fn neutral(&mut self, me: &FighterView, opponent: &FighterView, intent: &mut Intent) {
        let cfg = &self.tuning.neutral;
        let distance = me.distance_to(opponent);

        if distance > cfg.far_distance {
            intent.move_velocity = me.direction_to(opponent) * cfg.far_speed;
        } else if distance > cfg.mid_distance {
            intent.move_velocity = me.direction_to(opponent) * cfg.walk_speed;
        } else {
            self.idle_timer += 1;
            if self.idle_timer > cfg.dwell_ticks
                && me.attack_cooldown == 0
                && me.vertical_gap(opponent) < cfg.max_vertical_gap
                && self.rng.gen_bool(cfg.attack_chance)
            {
                intent.attack = Some(AttackKind::roll(&mut self.rng, cfg.primary_attack_bias));
            }
        }
    }
}

impl IntentSource for AiController {
    fn produce_intent(&mut self, ctx: &IntentContext) -> Intent {
        let me = &ctx.me;
        let opponent = &ctx.opponent;

        self.decision_timer += 1;
        if self.decision_timer > self.tuning.decision_interval {
            self.decision_timer = 0;
            let mode = self.choose_mode(me.health, me.distance_to(opponent));
            if mode != self.mode {
                tracing::debug!(slot = ?me.slot, from = ?self.mode, to = ?mode, "ai mode change");
            }
            self.mode = mode;
        }

        self.move_timer += 1;

        // Dwell again only once a requested swing actually started
        if me.attack_cooldown > self.last_cooldown {
            self.idle_timer = 0;
        }
        self.last_cooldown = me.attack_cooldown;

        let mut intent = Intent::idle();
        match self.mode {
            AiMode::Aggressive => self.aggressive(me, opponent, &mut intent),
            AiMode::Defensive => self.defensive(me, opponent, &mut intent),
            AiMode::Neutral => self.neutral(me, opponent, &mut intent),
        }

        if intent.move_velocity != 0.0 {
            self.idle_timer = 0;
        }

        intent
    }

    fn kind(&self) -> ControllerKind {
        self.kind
    }

    fn reset(&mut self) {
        self.mode = AiMode::Neutral;
        self.decision_timer = 0;
        self.idle_timer = 0;
        self.move_timer = 0;
        self.last_direction = 0.0;
        self.last_cooldown = 0;
    }
}
