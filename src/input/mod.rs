//! Logical input actions
//!
//! Raw key capture lives in the front end. The simulation only asks whether a
//! logical action is active, and derives press edges itself so that confirm
//! and pause fire once per press rather than once per held tick.

/// A logical action a player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalAction {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Pause,
    Confirm,
}

impl LogicalAction {
    pub const ALL: [LogicalAction; 6] = [
        LogicalAction::MoveLeft,
        LogicalAction::MoveRight,
        LogicalAction::Jump,
        LogicalAction::Attack,
        LogicalAction::Pause,
        LogicalAction::Confirm,
    ];

    /// Stable position in [`LogicalAction::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Anything that can report which logical actions are currently held
pub trait InputSource {
    fn is_action_active(&self, action: LogicalAction) -> bool;
}

/// Compact set of logical actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(actions: &[LogicalAction]) -> Self {
        let mut set = Self::empty();
        for &action in actions {
            set.insert(action);
        }
        set
    }

    /// Snapshot every action of a source
    pub fn sample(source: &dyn InputSource) -> Self {
        let mut set = Self::empty();
        for action in LogicalAction::ALL {
            if source.is_action_active(action) {
                set.insert(action);
            }
        }
        set
    }

    pub fn insert(&mut self, action: LogicalAction) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: LogicalAction) {
        self.0 &= !action.bit();
    }

    pub fn contains(&self, action: LogicalAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Actions in `self` that are not in `other`
    pub fn difference(&self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }
}

impl InputSource for ActionSet {
    fn is_action_active(&self, action: LogicalAction) -> bool {
        self.contains(action)
    }
}

/// Input as seen by one tick: what is held and what was pressed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: ActionSet,
    pub pressed: ActionSet,
}

impl InputFrame {
    pub fn is_held(&self, action: LogicalAction) -> bool {
        self.held.contains(action)
    }

    pub fn just_pressed(&self, action: LogicalAction) -> bool {
        self.pressed.contains(action)
    }
}

/// Turns level-triggered input into per-tick frames with press edges
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: ActionSet,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, source: &dyn InputSource) -> InputFrame {
        let held = ActionSet::sample(source);
        let pressed = held.difference(self.previous);
        self.previous = held;
        InputFrame { held, pressed }
    }
}
