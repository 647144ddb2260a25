//! AI policy thresholds, loaded from the `[ai_policy]` TOML table
//!
//! All values are fixed per session. There is no learning and no difficulty
//! scaling beyond the controller cooldowns.

use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};

/// Close-range pressure when healthy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressiveConfig {
    /// Speed while outside attack range
    pub far_speed: f32,
    /// Speed while between comfortable range and attack range
    pub approach_speed: f32,
    /// Ticks to stand still before an attack may trigger
    pub dwell_ticks: u32,
    /// Attacks only when the vertical gap is below this
    pub max_vertical_gap: f32,
    /// Per-tick attack probability once dwell is satisfied
    pub attack_chance: f64,
    /// Probability that a triggered attack is attack1
    pub primary_attack_bias: f64,
    /// Per-tick jump probability while moving
    pub jump_chance: f64,
}

impl Default for AggressiveConfig {
    fn default() -> Self {
        Self {
            far_speed: 3.5,
            approach_speed: 2.0,
            dwell_ticks: 40,
            max_vertical_gap: 50.0,
            attack_chance: 0.08,
            primary_attack_bias: 0.6,
            jump_chance: 0.008,
        }
    }
}

/// Low-health retreat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefensiveConfig {
    /// Retreats while the opponent is closer than this
    pub retreat_distance: f32,
    pub retreat_speed: f32,
    /// Per-tick attack probability inside attack range (attack1 only)
    pub attack_chance: f64,
}

impl Default for DefensiveConfig {
    fn default() -> Self {
        Self {
            retreat_distance: 300.0,
            retreat_speed: 3.0,
            attack_chance: 0.02,
        }
    }
}

/// Careful approach
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralConfig {
    pub far_distance: f32,
    pub far_speed: f32,
    pub mid_distance: f32,
    pub walk_speed: f32,
    pub dwell_ticks: u32,
    pub max_vertical_gap: f32,
    pub attack_chance: f64,
    pub primary_attack_bias: f64,
}

impl Default for NeutralConfig {
    fn default() -> Self {
        Self {
            far_distance: 300.0,
            far_speed: 2.5,
            mid_distance: 150.0,
            walk_speed: 1.5,
            dwell_ticks: 60,
            max_vertical_gap: 40.0,
            attack_chance: 0.05,
            primary_attack_bias: 0.5,
        }
    }
}

/// Complete AI policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Mode is re-evaluated once the decision timer exceeds this
    pub decision_interval: u32,
    /// Aggressive-mode travel direction is re-decided once the move timer exceeds this
    pub direction_interval: u32,
    /// Below this health the AI turns defensive
    pub defensive_below_health: u8,
    /// Aggressive only above this health...
    pub aggressive_above_health: u8,
    /// ...and closer than this
    pub aggressive_within: f32,
    pub attack_range: f32,
    /// Inside this range the AI stops and dwells
    pub comfortable_range: f32,
    pub aggressive: AggressiveConfig,
    pub defensive: DefensiveConfig,
    pub neutral: NeutralConfig,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            decision_interval: 90,
            direction_interval: 30,
            defensive_below_health: 25,
            aggressive_above_health: 50,
            aggressive_within: 200.0,
            attack_range: 180.0,
            comfortable_range: 120.0,
            aggressive: AggressiveConfig::default(),
            defensive: DefensiveConfig::default(),
            neutral: NeutralConfig::default(),
        }
    }
}

impl AiTuning {
    pub fn validate(&self) -> Result<()> {
        if self.comfortable_range >= self.attack_range {
            return Err(DuelError::InvalidConfig(format!(
                "ai_policy.comfortable_range ({}) must be below attack_range ({})",
                self.comfortable_range, self.attack_range
            )));
        }

        if self.neutral.mid_distance >= self.neutral.far_distance {
            return Err(DuelError::InvalidConfig(
                "ai_policy.neutral.mid_distance must be below far_distance".into(),
            ));
        }

        let chances = [
            self.aggressive.attack_chance,
            self.aggressive.primary_attack_bias,
            self.aggressive.jump_chance,
            self.defensive.attack_chance,
            self.neutral.attack_chance,
            self.neutral.primary_attack_bias,
        ];
        if chances.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(DuelError::InvalidConfig(
                "ai_policy probabilities must be in 0.0..=1.0".into(),
            ));
        }

        Ok(())
    }
}
