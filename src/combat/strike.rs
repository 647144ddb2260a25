//! Strike resolution
//!
//! Stateless: one call tests one strike box against one body. Calling it
//! once per swing is the caller's job.

use crate::core::config::DuelConfig;
use crate::core::types::Rect;
use crate::fighter::Fighter;
use crate::simulation::events::{DuelEventLog, DuelEventType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// Strike box did not overlap the defender's body
    Missed,
    /// Overlapped, but the defender is still in hit-stun
    Absorbed,
    /// Damage applied
    Landed { health_after: u8 },
}

impl StrikeOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, StrikeOutcome::Landed { .. })
    }
}

/// Box in front of the attacker's body on the side it faces, covering the
/// middle half of its height.
pub fn strike_rect(attacker: &Fighter, strike_width: f32) -> Rect {
    let body = attacker.body_rect();
    let x = if attacker.facing_flipped {
        body.x - strike_width
    } else {
        body.right()
    };
    Rect::new(x, body.y + body.height / 4.0, strike_width, body.height / 2.0)
}

/// Test the attacker's strike box against the defender and apply damage on overlap.
pub fn resolve_strike(
    attacker: &Fighter,
    defender: &mut Fighter,
    config: &DuelConfig,
    events: &mut DuelEventLog,
) -> StrikeOutcome {
    let combat = &config.combat;
    if attacker.slot == defender.slot {
        return StrikeOutcome::Missed;
    }

    let strike = strike_rect(attacker, combat.strike_width);
    let body = defender.body_rect();
    tracing::debug!(
        attacker = ?attacker.slot,
        ?strike,
        defender_body = ?body,
        "strike check"
    );

    let outcome = if !strike.overlaps(&body) {
        StrikeOutcome::Missed
    } else if defender.hit_cooldown > 0 {
        StrikeOutcome::Absorbed
    } else if defender.take_damage(combat.damage, config, events) {
        tracing::debug!(attacker = ?attacker.slot, defender = ?defender.slot, "strike landed");
        StrikeOutcome::Landed {
            health_after: defender.health,
        }
    } else {
        StrikeOutcome::Absorbed
    };

    events.push(DuelEventType::StrikeChecked {
        attacker: attacker.slot,
        strike,
        landed: outcome.landed(),
    });
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CharacterKind, ControllerKind, Slot};
    use crate::fighter::FighterSpec;
    use glam::Vec2;

    fn fighters(p1_x: f32, p2_x: f32) -> (Fighter, Fighter, DuelConfig) {
        let config = DuelConfig::new();
        let mut a = Fighter::new(
            FighterSpec::from_config(Slot::P1, ControllerKind::Human, CharacterKind::Swordsman, &config),
            &config,
        )
        .unwrap();
        let mut b = Fighter::new(
            FighterSpec::from_config(Slot::P2, ControllerKind::Ai, CharacterKind::Demon, &config),
            &config,
        )
        .unwrap();
        a.position = Vec2::new(p1_x, 296.0);
        b.position = Vec2::new(p2_x, 296.0);
        a.facing_flipped = p2_x <= p1_x;
        b.facing_flipped = p1_x <= p2_x;
        (a, b, config)
    }

    #[test]
    fn test_strike_rect_in_front() {
        let (a, b, config) = fighters(200.0, 400.0);
        let right = strike_rect(&a, config.combat.strike_width);
        assert_eq!(right, Rect::new(320.0, 341.0, 80.0, 90.0));

        let left = strike_rect(&b, config.combat.strike_width);
        assert_eq!(left, Rect::new(320.0, 341.0, 80.0, 90.0));

        // Never overlaps its own body
        assert!(!right.overlaps(&a.body_rect()));
        assert!(!left.overlaps(&b.body_rect()));
    }

    #[test]
    fn test_adjacent_strike_lands() {
        let (a, mut b, config) = fighters(200.0, 350.0);
        let mut log = DuelEventLog::new(0);

        let outcome = resolve_strike(&a, &mut b, &config, &mut log);
        assert_eq!(outcome, StrikeOutcome::Landed { health_after: 85 });
        assert_eq!(b.health, 85);
        assert!(log.contains(|e| matches!(e, DuelEventType::StrikeChecked { landed: true, .. })));
    }

    #[test]
    fn test_out_of_range_misses_even_mid_swing() {
        let (mut a, mut b, config) = fighters(200.0, 401.0);
        let mut log = DuelEventLog::new(0);
        a.is_attacking = true;

        let outcome = resolve_strike(&a, &mut b, &config, &mut log);
        assert_eq!(outcome, StrikeOutcome::Missed);
        assert_eq!(b.health, 100);
    }

    #[test]
    fn test_strike_during_hit_stun_absorbed() {
        let (a, mut b, config) = fighters(200.0, 350.0);
        let mut log = DuelEventLog::new(0);
        b.hit_cooldown = 10;

        let outcome = resolve_strike(&a, &mut b, &config, &mut log);
        assert_eq!(outcome, StrikeOutcome::Absorbed);
        assert_eq!(b.health, 100);
    }

    #[test]
    fn test_facing_away_misses() {
        let (mut a, mut b, config) = fighters(200.0, 350.0);
        let mut log = DuelEventLog::new(0);
        a.facing_flipped = true;

        assert_eq!(
            resolve_strike(&a, &mut b, &config, &mut log),
            StrikeOutcome::Missed
        );
    }

    #[test]
    fn test_resolver_is_idempotent_per_call() {
        let (a, mut b, config) = fighters(200.0, 350.0);
        let mut log = DuelEventLog::new(0);

        resolve_strike(&a, &mut b, &config, &mut log);
        // Second call lands nothing: hit-stun gates it
        let again = resolve_strike(&a, &mut b, &config, &mut log);
        assert_eq!(again, StrikeOutcome::Absorbed);
        assert_eq!(b.health, 85);
    }
}
