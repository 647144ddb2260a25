//! Duel integration tests
//!
//! End-to-end checks across fighters, strike resolution, round flow and the
//! per-tick loop, driven through the public API only.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use proptest::prelude::*;

use duel_arena::combat::{resolve_strike, StrikeOutcome};
use duel_arena::core::config::DuelConfig;
use duel_arena::core::types::{CharacterKind, ControllerKind, Slot};
use duel_arena::fighter::{
    Action, AttackKind, Fighter, FighterSpec, Intent, IntentContext, IntentSource,
};
use duel_arena::input::{ActionSet, LogicalAction};
use duel_arena::round::{Phase, RoundManager, RoundOutcome};
use duel_arena::simulation::{DuelEventLog, DuelEventType, DuelSimulation};

const SECOND: Duration = Duration::from_millis(1000);
const FRAME: Duration = Duration::from_millis(16);

/// Two grounded fighters at the given x positions, facing each other
fn fighters(p1_x: f32, p2_x: f32) -> (Fighter, Fighter, DuelConfig) {
    let config = DuelConfig::default();
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
    let ground = config.arena.ground_y() - config.fighters.body_height;
    a.position = Vec2::new(p1_x, ground);
    b.position = Vec2::new(p2_x, ground);
    a.facing_flipped = p2_x <= p1_x;
    b.facing_flipped = p1_x <= p2_x;
    (a, b, config)
}

/// A round manager already past the countdown
fn playing_round(config: &DuelConfig) -> RoundManager {
    let mut round = RoundManager::new(config.round.clone());
    let mut log = DuelEventLog::new(0);
    while round.phase() != Phase::Playing {
        round.advance(SECOND, &mut log);
    }
    round
}

struct Idle(ControllerKind);

impl IntentSource for Idle {
    fn produce_intent(&mut self, _ctx: &IntentContext) -> Intent {
        Intent::idle()
    }

    fn kind(&self) -> ControllerKind {
        self.0
    }
}

struct Swinger;

impl IntentSource for Swinger {
    fn produce_intent(&mut self, _ctx: &IntentContext) -> Intent {
        Intent {
            attack: Some(AttackKind::Primary),
            ..Intent::idle()
        }
    }

    fn kind(&self) -> ControllerKind {
        ControllerKind::Human
    }
}

fn duel(p1: Box<dyn IntentSource>) -> DuelSimulation {
    DuelSimulation::new(
        DuelConfig::default(),
        [CharacterKind::Swordsman, CharacterKind::Demon],
        [p1, Box::new(Idle(ControllerKind::Ai))],
    )
    .unwrap()
}

/// Seven landed strikes take a fighter from full health to a knockout and
/// score the round exactly once.
#[test]
fn test_seven_hits_knock_out() {
    let (a, mut b, config) = fighters(200.0, 350.0);
    let mut round = playing_round(&config);
    let mut healths = Vec::new();

    for _ in 0..7 {
        let mut log = DuelEventLog::new(0);
        let outcome = resolve_strike(&a, &mut b, &config, &mut log);
        assert!(outcome.landed());
        healths.push(b.health);
        // Skip the hit-stun window
        b.hit_cooldown = 0;

        let ended = round.check_round_over([a.alive, b.alive], &mut log);
        if b.alive {
            assert_eq!(ended, None);
        } else {
            assert_eq!(ended, Some(RoundOutcome::Winner(Slot::P1)));
        }
    }

    assert_eq!(healths, vec![85, 70, 55, 40, 25, 10, 0]);
    assert!(!b.alive);
    assert_eq!(round.phase(), Phase::RoundOver);
    assert_eq!(round.scores().get(Slot::P1), 1);

    // Already over: a second check does not score again
    let mut log = DuelEventLog::new(1);
    assert_eq!(round.check_round_over([a.alive, b.alive], &mut log), None);
    assert_eq!(round.scores().get(Slot::P1), 1);
    assert_eq!(round.scores().get(Slot::P2), 0);
}

/// The same knockout played through the tick loop: swings land on their own
/// cadence, hit-stun wears off between them, and the round scores once.
#[test]
fn test_knockout_through_tick_loop() {
    let mut duel = duel(Box::new(Swinger));
    let none = ActionSet::empty();
    while duel.phase() != Phase::Playing {
        duel.run_tick(&none, SECOND);
    }
    let ground = duel.config().arena.ground_y() - duel.config().fighters.body_height;
    duel.fighter_mut(Slot::P1).position = Vec2::new(200.0, ground);
    duel.fighter_mut(Slot::P2).position = Vec2::new(330.0, ground);

    let mut healths = Vec::new();
    let mut score_changes = Vec::new();
    let mut deaths = 0;
    for _ in 0..1000 {
        let events = duel.run_tick(&none, FRAME);
        for event in events.iter() {
            match event {
                DuelEventType::Damaged { slot: Slot::P2, health } => healths.push(*health),
                DuelEventType::ScoreChanged { slot, score } => score_changes.push((*slot, *score)),
                DuelEventType::Died { .. } => deaths += 1,
                _ => {}
            }
        }
    }

    assert_eq!(healths, vec![85, 70, 55, 40, 25, 10, 0]);
    assert_eq!(score_changes, vec![(Slot::P1, 1)]);
    assert_eq!(deaths, 1);
    assert_eq!(duel.phase(), Phase::RoundOver);
    assert_eq!(duel.round().outcome(), Some(RoundOutcome::Winner(Slot::P1)));
    assert!(duel.fighter(Slot::P1).alive);
    assert!(!duel.fighter(Slot::P2).alive);
}

/// A strike that does not reach the defender changes nothing
#[test]
fn test_out_of_range_strike_misses() {
    let (a, mut b, config) = fighters(100.0, 700.0);
    let mut log = DuelEventLog::new(0);

    assert_eq!(resolve_strike(&a, &mut b, &config, &mut log), StrikeOutcome::Missed);
    assert_eq!(b.health, 100);
    assert!(!b.is_hit);
    assert!(log.contains(|e| matches!(e, DuelEventType::StrikeChecked { landed: false, .. })));
    assert!(!log.contains(|e| matches!(e, DuelEventType::Damaged { .. })));
}

/// 3, 2, 1 at one step per second, then the banner, then play
#[test]
fn test_countdown_then_banner_then_play() {
    let mut duel = duel(Box::new(Idle(ControllerKind::Human)));
    let none = ActionSet::empty();
    let mut steps = Vec::new();

    for _ in 0..3 {
        let events = duel.run_tick(&none, SECOND);
        steps.extend(events.iter().filter_map(|e| match e {
            DuelEventType::CountdownStep { value } => Some(*value),
            _ => None,
        }));
    }
    assert_eq!(steps, vec![2, 1, 0]);
    assert_eq!(duel.phase(), Phase::Countdown);

    let banner = duel.config().round.fight_banner_ticks;
    for _ in 1..banner {
        duel.run_tick(&none, FRAME);
        assert_eq!(duel.phase(), Phase::Countdown);
    }
    let events = duel.run_tick(&none, FRAME);
    assert_eq!(duel.phase(), Phase::Playing);
    assert!(events.contains(|e| matches!(e, DuelEventType::FightStarted)));
}

/// Nothing about a fighter moves while the duel is paused
#[test]
fn test_pause_freezes_timers() {
    let mut duel = duel(Box::new(Swinger));
    let none = ActionSet::empty();
    while duel.phase() != Phase::Playing {
        duel.run_tick(&none, SECOND);
    }
    for _ in 0..5 {
        duel.run_tick(&none, FRAME);
    }

    let pause = ActionSet::of(&[LogicalAction::Pause]);
    duel.run_tick(&pause, FRAME);
    assert_eq!(duel.phase(), Phase::Paused);

    let before = duel.fighter(Slot::P1).clone();
    assert!(before.attack_cooldown > 0);
    for _ in 0..30 {
        duel.run_tick(&pause, FRAME);
        duel.run_tick(&none, FRAME);
    }
    let after = duel.fighter(Slot::P1);
    assert_eq!(duel.phase(), Phase::Paused);
    assert_eq!(after.attack_cooldown, before.attack_cooldown);
    assert_eq!(after.position, before.position);
    assert_eq!(after.animation.frame, before.animation.frame);
    assert_eq!(after.animation.frame_timer, before.animation.frame_timer);

    let events = duel.run_tick(&ActionSet::of(&[LogicalAction::Confirm]), FRAME);
    assert_eq!(duel.phase(), Phase::Playing);
    assert!(events.contains(|e| matches!(e, DuelEventType::Resumed)));
}

/// A knocked-out fighter ignores damage and attacks until reset
#[test]
fn test_dead_fighter_stays_dead_until_reset() {
    let (mut a, mut b, config) = fighters(200.0, 350.0);
    let mut log = DuelEventLog::new(0);
    while b.alive {
        resolve_strike(&a, &mut b, &config, &mut log);
        b.hit_cooldown = 0;
    }

    for _ in 0..100 {
        b.update(None, &mut a, &config, &mut log);
    }
    assert!(!b.alive);
    assert_eq!(b.health, 0);
    assert_eq!(b.action(), Action::Death);
    assert!(!b.take_damage(15, &config, &mut log));
    assert!(!b.try_attack(AttackKind::Primary, &mut log));

    b.reset();
    assert!(b.alive);
    assert_eq!(b.health, 100);
    assert_eq!(b.position, b.spawn());
}

/// The bundled config file matches the built-in defaults
#[test]
fn test_bundled_config_loads() {
    let config = DuelConfig::load(Path::new("data/duel.toml")).unwrap();
    let defaults = DuelConfig::default();
    assert_eq!(config.combat.damage, defaults.combat.damage);
    assert_eq!(config.human.attack_cooldown, defaults.human.attack_cooldown);
    assert_eq!(config.ai.attack_cooldown, defaults.ai.attack_cooldown);
    assert_eq!(config.round.fight_banner_ticks, defaults.round.fight_banner_ticks);
}

proptest! {
    /// Health never rises and never leaves 0..=100, whatever the mix of
    /// strikes and ticks.
    #[test]
    fn prop_health_is_monotonic(ops in prop::collection::vec(any::<bool>(), 1..200)) {
        let (mut a, mut b, config) = fighters(200.0, 350.0);
        let mut log = DuelEventLog::new(0);
        let mut last = b.health;

        for strike in ops {
            if strike {
                resolve_strike(&a, &mut b, &config, &mut log);
            } else {
                b.update(None, &mut a, &config, &mut log);
            }
            prop_assert!(b.health <= last);
            prop_assert!(b.health <= 100);
            prop_assert_eq!(b.alive, b.health > 0);
            last = b.health;
        }
    }

    /// Asking to attack during the cooldown is a no-op
    #[test]
    fn prop_attack_during_cooldown_is_noop(cooldown in 1u32..120, secondary in any::<bool>()) {
        let (mut a, _b, _config) = fighters(200.0, 350.0);
        a.attack_cooldown = cooldown;
        let action = a.action();
        let mut log = DuelEventLog::new(0);
        let kind = if secondary { AttackKind::Secondary } else { AttackKind::Primary };

        prop_assert!(!a.try_attack(kind, &mut log));
        prop_assert!(!a.is_attacking);
        prop_assert_eq!(a.attack_cooldown, cooldown);
        prop_assert_eq!(a.action(), action);
        prop_assert!(log.is_empty());
    }
}
