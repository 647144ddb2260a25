//! Animation state machine for fighters.
//!
//! Frame advancement and action completion are separate concerns: the
//! controller only reports *that* an action finished a cycle and which
//! [`Completion`] applies. The fighter reducer decides what the completion
//! means for its combat flags.

use serde::{Deserialize, Serialize};

/// The single active action of a fighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Run,
    Jump,
    Attack1,
    Attack2,
    Hit,
    Death,
}

/// What finishing one full cycle of an action means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Wrap to frame 0 and keep going.
    Loop,
    /// The swing is over.
    EndAttack,
    /// Hit-stun animation is over.
    EndHitStun,
    /// Hold the last frame forever.
    Freeze,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Idle,
        Action::Run,
        Action::Jump,
        Action::Attack1,
        Action::Attack2,
        Action::Hit,
        Action::Death,
    ];

    /// Transition table consumed by the fighter reducer.
    pub fn on_complete(self) -> Completion {
        match self {
            Action::Idle | Action::Run | Action::Jump => Completion::Loop,
            Action::Attack1 | Action::Attack2 => Completion::EndAttack,
            Action::Hit => Completion::EndHitStun,
            Action::Death => Completion::Freeze,
        }
    }

    /// Idle, run and jump are picked every tick from movement; the others
    /// run until their animation completes.
    pub fn is_locomotion(self) -> bool {
        matches!(self, Action::Idle | Action::Run | Action::Jump)
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Attack1 => "attack1",
            Action::Attack2 => "attack2",
            Action::Hit => "hit",
            Action::Death => "death",
        }
    }
}

/// Frame counts per action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipTable {
    pub idle: u8,
    pub run: u8,
    pub jump: u8,
    pub attack1: u8,
    pub attack2: u8,
    pub hit: u8,
    pub death: u8,
}

impl Default for ClipTable {
    fn default() -> Self {
        Self {
            idle: 8,
            run: 8,
            jump: 2,
            attack1: 6,
            attack2: 6,
            hit: 4,
            death: 6,
        }
    }
}

impl ClipTable {
    pub fn frame_count(&self, action: Action) -> u8 {
        match action {
            Action::Idle => self.idle,
            Action::Run => self.run,
            Action::Jump => self.jump,
            Action::Attack1 => self.attack1,
            Action::Attack2 => self.attack2,
            Action::Hit => self.hit,
            Action::Death => self.death,
        }
    }

    /// Ticks one full cycle of an action takes.
    pub fn cycle_ticks(&self, action: Action, ticks_per_frame: u32) -> u32 {
        self.frame_count(action) as u32 * ticks_per_frame
    }
}

/// Controls animation playback for a single fighter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationController {
    /// Current action.
    pub current: Action,
    /// Current frame within the action.
    pub frame: u8,
    /// Ticks spent on the current frame.
    pub frame_timer: u32,
    /// Set once a frozen action reached its last frame.
    pub finished: bool,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch action. Resets the frame if the action changed.
    pub fn set_action(&mut self, action: Action) {
        if self.current != action {
            self.restart(action);
        }
    }

    /// Switch action and always restart from frame 0.
    pub fn restart(&mut self, action: Action) {
        self.current = action;
        self.frame = 0;
        self.frame_timer = 0;
        self.finished = false;
    }

    /// Advance one tick. Returns the completion when the action finished a cycle.
    pub fn advance(&mut self, clips: &ClipTable, ticks_per_frame: u32) -> Option<Completion> {
        if self.finished {
            return None;
        }

        let frame_count = clips.frame_count(self.current);
        if frame_count == 0 {
            return None;
        }

        self.frame_timer += 1;
        if self.frame_timer < ticks_per_frame {
            return None;
        }
        self.frame_timer = 0;

        let next_frame = self.frame + 1;
        if next_frame < frame_count {
            self.frame = next_frame;
            return None;
        }

        let completion = self.current.on_complete();
        if completion == Completion::Freeze {
            self.frame = frame_count - 1;
            self.finished = true;
        } else {
            self.frame = 0;
        }
        Some(completion)
    }
}
