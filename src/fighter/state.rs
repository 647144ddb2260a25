//! The fighter entity and its per-tick state machine

use glam::Vec2;

use crate::combat;
use crate::core::config::{ControllerTuning, DuelConfig};
use crate::core::error::{DuelError, Result};
use crate::core::types::{CharacterKind, ControllerKind, Rect, Slot};
use crate::fighter::animation::{Action, AnimationController, ClipTable, Completion};
use crate::fighter::intent::{AttackKind, FighterView, Intent};
use crate::simulation::events::{DuelEventLog, DuelEventType};

pub const MAX_HEALTH: i32 = 100;

/// Construction input for a [`Fighter`]
#[derive(Debug, Clone)]
pub struct FighterSpec {
    pub slot: Slot,
    pub controller: ControllerKind,
    pub character: CharacterKind,
    pub spawn: Vec2,
    pub width: f32,
    pub height: f32,
    pub health: i32,
}

impl FighterSpec {
    /// Spec for a slot using the configured layout and full health
    pub fn from_config(
        slot: Slot,
        controller: ControllerKind,
        character: CharacterKind,
        config: &DuelConfig,
    ) -> Self {
        let layout = &config.fighters;
        let spawn = match slot {
            Slot::P1 => layout.p1_spawn,
            Slot::P2 => layout.p2_spawn,
        };
        Self {
            slot,
            controller,
            character,
            spawn: Vec2::from(spawn),
            width: layout.body_width,
            height: layout.body_height,
            health: MAX_HEALTH,
        }
    }
}

/// One of the two combatants.
///
/// Constructed once per slot and reused across rounds through [`Fighter::reset`].
#[derive(Debug, Clone)]
pub struct Fighter {
    pub slot: Slot,
    pub controller: ControllerKind,
    pub character: CharacterKind,

    pub position: Vec2,
    pub velocity: Vec2,
    /// Hitbox footprint, smaller than the drawn sprite
    pub width: f32,
    pub height: f32,

    pub health: u8,
    /// False only after the damage transition takes health to 0
    pub alive: bool,

    pub is_attacking: bool,
    pub attack_cooldown: u32,
    pub is_hit: bool,
    pub hit_cooldown: u32,
    pub is_jumping: bool,
    /// True while facing left (opponent is not to the right)
    pub facing_flipped: bool,

    pub animation: AnimationController,
    pub clips: ClipTable,

    tuning: ControllerTuning,
    /// One-shot strike of the current swing
    strike_pending: bool,
    spawn: Vec2,
    spawn_health: u8,
}

impl Fighter {
    /// Create a fighter. Fails on sizes or health a caller should never pass.
    pub fn new(spec: FighterSpec, config: &DuelConfig) -> Result<Self> {
        if !(spec.width.is_finite() && spec.width > 0.0)
            || !(spec.height.is_finite() && spec.height > 0.0)
        {
            return Err(DuelError::InvalidFighter(format!(
                "{:?}: size must be positive, got {}x{}",
                spec.slot, spec.width, spec.height
            )));
        }

        if !(0..=MAX_HEALTH).contains(&spec.health) {
            return Err(DuelError::InvalidFighter(format!(
                "{:?}: health {} outside 0..={}",
                spec.slot, spec.health, MAX_HEALTH
            )));
        }

        if !spec.spawn.is_finite() {
            return Err(DuelError::InvalidFighter(format!(
                "{:?}: spawn position is not finite",
                spec.slot
            )));
        }

        let health = spec.health as u8;
        let mut animation = AnimationController::new();
        if health == 0 {
            animation.restart(Action::Death);
        }

        Ok(Self {
            slot: spec.slot,
            controller: spec.controller,
            character: spec.character,
            position: spec.spawn,
            velocity: Vec2::ZERO,
            width: spec.width,
            height: spec.height,
            health,
            alive: health > 0,
            is_attacking: false,
            attack_cooldown: 0,
            is_hit: false,
            hit_cooldown: 0,
            is_jumping: false,
            facing_flipped: spec.slot == Slot::P2,
            animation,
            clips: ClipTable::default(),
            tuning: config.tuning(spec.controller).clone(),
            strike_pending: false,
            spawn: spec.spawn,
            spawn_health: health,
        })
    }

    pub fn action(&self) -> Action {
        self.animation.current
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn body_rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn view(&self) -> FighterView {
        FighterView {
            slot: self.slot,
            position: self.position,
            width: self.width,
            height: self.height,
            health: self.health,
            alive: self.alive,
            attack_cooldown: self.attack_cooldown,
            is_attacking: self.is_attacking,
            is_hit: self.is_hit,
            is_jumping: self.is_jumping,
        }
    }

    /// Advance one tick.
    ///
    /// `intent` is `None` when the fighter is not under control (dead, or the
    /// round is not being played); physics still integrates.
    pub fn update(
        &mut self,
        intent: Option<Intent>,
        opponent: &mut Fighter,
        config: &DuelConfig,
        events: &mut DuelEventLog,
    ) {
        let controlled = intent.is_some();
        if let Some(intent) = intent {
            self.apply_intent(intent, events);
        }
        self.select_locomotion();

        self.integrate(config, controlled);

        self.facing_flipped = opponent.position.x <= self.position.x;

        self.tick_cooldowns();

        if let Some(completion) = self
            .animation
            .advance(&self.clips, config.animation.ticks_per_frame)
        {
            self.complete(completion);
        }

        if self.is_attacking
            && self.strike_pending
            && self.attack_cooldown <= self.tuning.hit_check_tick
        {
            self.strike_pending = false;
            combat::resolve_strike(self, opponent, config, events);
        }
    }

    fn apply_intent(&mut self, intent: Intent, events: &mut DuelEventLog) {
        self.velocity.x = intent.move_velocity;

        if intent.jump && !self.is_jumping {
            self.velocity.y = self.tuning.jump_impulse;
            self.is_jumping = true;
        }

        if let Some(kind) = intent.attack {
            self.try_attack(kind, events);
        }
    }

    /// Start a swing if the cooldown has elapsed and the fighter is free to act.
    ///
    /// Returns false, leaving state untouched, when the attack is not allowed.
    pub fn try_attack(&mut self, kind: AttackKind, events: &mut DuelEventLog) -> bool {
        if !self.alive || self.attack_cooldown > 0 || self.is_hit || !self.action().is_locomotion()
        {
            return false;
        }

        self.is_attacking = true;
        self.attack_cooldown = self.tuning.attack_cooldown;
        self.strike_pending = true;
        self.animation.restart(kind.action());

        events.push(DuelEventType::AttackSwing {
            slot: self.slot,
            controller: self.controller,
        });
        true
    }

    /// Idle/run/jump follow movement but never override attack, hit or death.
    fn select_locomotion(&mut self) {
        if !self.alive || self.is_attacking || self.is_hit {
            return;
        }

        let action = if self.is_jumping {
            Action::Jump
        } else if self.velocity.x != 0.0 {
            Action::Run
        } else {
            Action::Idle
        };
        self.animation.set_action(action);
    }

    fn integrate(&mut self, config: &DuelConfig, controlled: bool) {
        self.velocity.y += config.physics.gravity;
        self.position += self.velocity;

        let ground_y = config.arena.ground_y();
        if self.position.y + self.height > ground_y {
            self.position.y = ground_y - self.height;
            self.velocity.y = 0.0;
            self.is_jumping = false;
            // Nobody is steering: leftover slide stops on landing
            if !controlled {
                self.velocity.x = 0.0;
            }
        }

        let max_x = config.arena.width - self.width;
        self.position.x = self.position.x.clamp(0.0, max_x.max(0.0));
    }

    fn tick_cooldowns(&mut self) {
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);

        if self.hit_cooldown > 0 {
            self.hit_cooldown -= 1;
            if self.hit_cooldown == 0 {
                self.is_hit = false;
            }
        }
    }

    /// Reducer for animation completions
    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Loop | Completion::Freeze => {}
            Completion::EndAttack => {
                self.is_attacking = false;
                self.strike_pending = false;
                self.animation.set_action(Action::Idle);
            }
            Completion::EndHitStun => {
                self.is_hit = false;
                self.animation.set_action(Action::Idle);
            }
        }
    }

    /// Damage transition. A no-op while hit-stunned or dead.
    ///
    /// Returns true if the damage registered.
    pub fn take_damage(
        &mut self,
        amount: u8,
        config: &DuelConfig,
        events: &mut DuelEventLog,
    ) -> bool {
        if !self.alive || self.hit_cooldown > 0 {
            tracing::debug!(slot = ?self.slot, "still in hit-stun, no damage");
            return false;
        }

        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        tracing::debug!(
            slot = ?self.slot,
            character = self.character.display_name(),
            damage = amount,
            before,
            after = self.health,
            "taking damage"
        );

        self.is_hit = true;
        self.hit_cooldown = config.combat.hit_stun_ticks;
        self.is_attacking = false;
        self.strike_pending = false;
        self.animation.restart(Action::Hit);

        // Knocked away from the side we face
        self.velocity.x = if self.facing_flipped {
            config.combat.knockback_x
        } else {
            -config.combat.knockback_x
        };
        self.velocity.y = config.combat.knockback_y;

        events.push(DuelEventType::Damaged {
            slot: self.slot,
            health: self.health,
        });

        if self.health == 0 {
            self.alive = false;
            self.animation.restart(Action::Death);
            events.push(DuelEventType::Died { slot: self.slot });
            tracing::info!(slot = ?self.slot, "fighter down");
        }

        true
    }

    /// Restore spawn position, health and flags. Identity is unchanged.
    pub fn reset(&mut self) {
        self.position = self.spawn;
        self.velocity = Vec2::ZERO;
        self.health = self.spawn_health;
        self.alive = self.spawn_health > 0;
        self.is_attacking = false;
        self.attack_cooldown = 0;
        self.is_hit = false;
        self.hit_cooldown = 0;
        self.is_jumping = false;
        self.facing_flipped = self.slot == Slot::P2;
        self.strike_pending = false;
        self.animation = AnimationController::new();
        if !self.alive {
            self.animation.restart(Action::Death);
        }
    }
}
