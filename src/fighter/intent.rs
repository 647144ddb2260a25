//! Intents and the sources that produce them
//!
//! A fighter never knows whether a human or the AI drives it. Each tick the
//! simulation asks the slot's [`IntentSource`] for an [`Intent`] and feeds it
//! to the fighter.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{ControllerKind, Slot};
use crate::fighter::animation::Action;
use crate::input::{InputFrame, LogicalAction};

/// Which of the two attack animations to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Primary,
    Secondary,
}

impl AttackKind {
    pub fn action(self) -> Action {
        match self {
            AttackKind::Primary => Action::Attack1,
            AttackKind::Secondary => Action::Attack2,
        }
    }

    /// Primary with probability `primary_bias`
    pub fn roll(rng: &mut impl Rng, primary_bias: f64) -> Self {
        if rng.gen_bool(primary_bias) {
            AttackKind::Primary
        } else {
            AttackKind::Secondary
        }
    }
}

/// A normalized movement/attack request, independent of its source
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Signed horizontal speed; 0 means stand still
    pub move_velocity: f32,
    pub jump: bool,
    pub attack: Option<AttackKind>,
}

impl Intent {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Public state of a fighter, as other parties may observe it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterView {
    pub slot: Slot,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub health: u8,
    pub alive: bool,
    pub attack_cooldown: u32,
    pub is_attacking: bool,
    pub is_hit: bool,
    pub is_jumping: bool,
}

impl FighterView {
    /// Horizontal distance between body origins
    pub fn distance_to(&self, other: &FighterView) -> f32 {
        (other.position.x - self.position.x).abs()
    }

    pub fn vertical_gap(&self, other: &FighterView) -> f32 {
        (other.position.y - self.position.y).abs()
    }

    /// -1.0 if `other` is to the left, 1.0 otherwise
    pub fn direction_to(&self, other: &FighterView) -> f32 {
        if other.position.x < self.position.x {
            -1.0
        } else {
            1.0
        }
    }
}

/// Everything an intent source may look at for one tick
#[derive(Debug, Clone, Copy)]
pub struct IntentContext<'a> {
    pub me: FighterView,
    pub opponent: FighterView,
    pub input: &'a InputFrame,
}

/// Produces a fighter's intent each tick
pub trait IntentSource {
    fn produce_intent(&mut self, ctx: &IntentContext) -> Intent;

    /// Which tuning (cooldowns, hit timing, jump) the driven fighter uses
    fn kind(&self) -> ControllerKind;

    /// Clear any per-round memory
    fn reset(&mut self) {}
}

/// Maps held logical actions to intents
#[derive(Debug, Clone)]
pub struct HumanController {
    move_speed: f32,
    rng: ChaCha8Rng,
}

impl HumanController {
    pub fn new(move_speed: f32, seed: u64) -> Self {
        Self {
            move_speed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl IntentSource for HumanController {
    fn produce_intent(&mut self, ctx: &IntentContext) -> Intent {
        let input = ctx.input;
        let mut intent = Intent::idle();

        if input.is_held(LogicalAction::MoveLeft) {
            intent.move_velocity = -self.move_speed;
        }
        // Right wins when both are held
        if input.is_held(LogicalAction::MoveRight) {
            intent.move_velocity = self.move_speed;
        }

        intent.jump = input.is_held(LogicalAction::Jump);

        if input.is_held(LogicalAction::Attack) {
            intent.attack = Some(AttackKind::roll(&mut self.rng, 0.5));
        }

        intent
    }

    fn kind(&self) -> ControllerKind {
        ControllerKind::Human
    }
}
