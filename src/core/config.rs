//! Duel configuration with documented constants
//!
//! Every tunable number of the game lives here. `Default` reproduces the
//! shipped game exactly; a TOML file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::AiTuning;
use crate::core::error::{DuelError, Result};
use crate::core::types::ControllerKind;
use crate::fighter::{Action, ClipTable};

/// Arena geometry. Arena space has y growing downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom edge to the ground line
    pub floor_offset: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 576.0,
            floor_offset: 100.0,
        }
    }
}

impl ArenaConfig {
    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.height - self.floor_offset
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick. No terminal velocity.
    pub gravity: f32,
    /// Walk speed of keyboard movement. AI speeds live in `[ai_policy]`.
    pub move_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            move_speed: 7.0,
        }
    }
}

/// Per-controller tuning. The AI is deliberately slower to re-attack.
///
/// A `[human]` or `[ai]` table must be given in full; partial tables would
/// silently mix the two controllers' numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerTuning {
    /// Ticks before another attack may start
    pub attack_cooldown: u32,
    /// Cooldown value at which the swing's strike is resolved
    ///
    /// Lands mid-swing: 10 ticks in for the human, 20 for the AI.
    pub hit_check_tick: u32,
    /// Upward impulse applied on jump (negative = up)
    pub jump_impulse: f32,
}

impl ControllerTuning {
    pub fn human() -> Self {
        Self {
            attack_cooldown: 40,
            hit_check_tick: 30,
            jump_impulse: -20.0,
        }
    }

    pub fn ai() -> Self {
        Self {
            attack_cooldown: 120,
            hit_check_tick: 100,
            jump_impulse: -18.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Same for both characters and both attack kinds
    pub damage: u8,
    /// Ticks of hit-stun during which no new damage registers
    pub hit_stun_ticks: u32,
    pub knockback_x: f32,
    /// Vertical lift on hit (negative = up)
    pub knockback_y: f32,
    /// Strike box width; its height is half the body height
    pub strike_width: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            damage: 15,
            hit_stun_ticks: 30,
            knockback_x: 5.0,
            knockback_y: -5.0,
            strike_width: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Ticks each sprite frame stays on screen
    pub ticks_per_frame: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { ticks_per_frame: 7 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub countdown_from: u8,
    /// Wall-clock time per countdown step
    pub countdown_step_ms: u64,
    /// Ticks the FIGHT! banner stays up before play starts
    pub fight_banner_ticks: u32,
    /// Minimum time on the KO screen before confirm resets the round
    pub reset_delay_ms: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            countdown_step_ms: 1000,
            fight_banner_ticks: 40,
            reset_delay_ms: 1500,
        }
    }
}

/// Body footprint and spawn points. Spawn is also the reset position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterLayout {
    pub body_width: f32,
    pub body_height: f32,
    pub p1_spawn: [f32; 2],
    /// P2 starts 20px higher than P1
    pub p2_spawn: [f32; 2],
}

impl Default for FighterLayout {
    fn default() -> Self {
        Self {
            body_width: 120.0,
            body_height: 180.0,
            p1_spawn: [200.0, 400.0],
            p2_spawn: [800.0, 380.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Sprites draw this many times larger than the body box
    pub sprite_scale: f32,
    /// Horizontal offset of the sprite relative to the body origin
    pub sprite_offset_x: f32,
    pub show_hitboxes: bool,
    pub volume: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sprite_scale: 4.0,
            sprite_offset_x: 40.0,
            show_hitboxes: false,
            volume: 0.1,
        }
    }
}

/// Complete configuration for one duel session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub arena: ArenaConfig,
    pub physics: PhysicsConfig,
    pub fighters: FighterLayout,
    pub human: ControllerTuning,
    pub ai: ControllerTuning,
    pub combat: CombatConfig,
    pub animation: AnimationConfig,
    pub round: RoundConfig,
    pub ai_policy: AiTuning,
    pub render: RenderConfig,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            physics: PhysicsConfig::default(),
            fighters: FighterLayout::default(),
            human: ControllerTuning::human(),
            ai: ControllerTuning::ai(),
            combat: CombatConfig::default(),
            animation: AnimationConfig::default(),
            round: RoundConfig::default(),
            ai_policy: AiTuning::default(),
            render: RenderConfig::default(),
        }
    }
}

impl DuelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuning for a controller kind
    pub fn tuning(&self, kind: ControllerKind) -> &ControllerTuning {
        match kind {
            ControllerKind::Human => &self.human,
            ControllerKind::Ai => &self.ai,
        }
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DuelConfig = toml::from_str(contents)?;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected config");
            return Err(e);
        }
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(DuelError::InvalidConfig(format!(
                "arena must have positive size, got {}x{}",
                self.arena.width, self.arena.height
            )));
        }

        if self.arena.floor_offset < 0.0 || self.arena.floor_offset >= self.arena.height {
            return Err(DuelError::InvalidConfig(format!(
                "floor_offset ({}) must be within the arena height ({})",
                self.arena.floor_offset, self.arena.height
            )));
        }

        if self.fighters.body_width > self.arena.width
            || self.fighters.body_height > self.arena.ground_y()
        {
            return Err(DuelError::InvalidConfig(
                "fighter body does not fit inside the arena".into(),
            ));
        }

        // The difficulty asymmetry: AI waits longer between swings
        if self.ai.attack_cooldown <= self.human.attack_cooldown {
            return Err(DuelError::InvalidConfig(format!(
                "ai.attack_cooldown ({}) must be longer than human.attack_cooldown ({})",
                self.ai.attack_cooldown, self.human.attack_cooldown
            )));
        }

        if self.animation.ticks_per_frame == 0 {
            return Err(DuelError::InvalidConfig("ticks_per_frame must be positive".into()));
        }

        for (name, tuning) in [("human", &self.human), ("ai", &self.ai)] {
            if tuning.hit_check_tick == 0 || tuning.hit_check_tick >= tuning.attack_cooldown {
                return Err(DuelError::InvalidConfig(format!(
                    "{}.hit_check_tick ({}) must fall strictly inside the cooldown ({})",
                    name, tuning.hit_check_tick, tuning.attack_cooldown
                )));
            }

            // The pending strike is dropped when the swing animation ends
            let clips = ClipTable::default();
            let swing = clips
                .cycle_ticks(Action::Attack1, self.animation.ticks_per_frame)
                .min(clips.cycle_ticks(Action::Attack2, self.animation.ticks_per_frame));
            let strike_at = tuning.attack_cooldown - tuning.hit_check_tick;
            if strike_at >= swing {
                return Err(DuelError::InvalidConfig(format!(
                    "{}.hit_check_tick ({}) lands {} ticks into the swing, after the {}-tick attack animation ends",
                    name, tuning.hit_check_tick, strike_at, swing
                )));
            }
        }

        if self.combat.damage == 0 || self.combat.damage > 100 {
            return Err(DuelError::InvalidConfig(format!(
                "damage ({}) must be in 1..=100",
                self.combat.damage
            )));
        }

        if !(0.0..=1.0).contains(&self.render.volume) {
            return Err(DuelError::InvalidConfig(format!(
                "volume ({}) must be in 0.0..=1.0",
                self.render.volume
            )));
        }

        self.ai_policy.validate()
    }
}
