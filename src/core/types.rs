//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one tick per display refresh)
pub type Tick = u64;

/// One of the two fighter slots in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    P1,
    P2,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::P1, Slot::P2];

    /// Array index for per-slot storage
    pub fn index(self) -> usize {
        match self {
            Slot::P1 => 0,
            Slot::P2 => 1,
        }
    }

    pub fn opponent(self) -> Slot {
        match self {
            Slot::P1 => Slot::P2,
            Slot::P2 => Slot::P1,
        }
    }
}

/// Who produces a fighter's intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    Human,
    Ai,
}

/// Playable character; decides sprite set and display name only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Swordsman,
    Demon,
}

impl CharacterKind {
    pub fn display_name(self) -> &'static str {
        match self {
            CharacterKind::Swordsman => "Swordsman",
            CharacterKind::Demon => "Demon",
        }
    }
}

/// Axis-aligned rectangle in arena space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap; boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
