//! Color definitions for fighters, health bars and overlays

use crate::core::types::Slot;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// 8-bit RGB channels for terminal backends
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Background color of the arena
pub const BACKGROUND: Color = Color::new(0.1, 0.1, 0.1, 1.0);

/// Ground line
pub const GROUND: Color = Color::new(0.35, 0.3, 0.25, 1.0);

/// Countdown digits
pub const COUNTDOWN: Color = Color::new(1.0, 0.84, 0.0, 1.0);

/// FIGHT! banner
pub const BANNER: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Outline color per slot (debug hitboxes use the same)
pub fn slot_color(slot: Slot) -> Color {
    match slot {
        Slot::P1 => Color::new(0.9, 0.2, 0.2, 1.0), // Red
        Slot::P2 => Color::new(0.2, 0.4, 0.9, 1.0), // Blue
    }
}

/// Health bar band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthBand {
    Critical,
    Wounded,
    #[default]
    Healthy,
}

impl HealthBand {
    pub fn for_health(health: u8) -> Self {
        if health < 30 {
            HealthBand::Critical
        } else if health < 60 {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        }
    }

    pub fn color(self) -> Color {
        match self {
            HealthBand::Critical => Color::new(1.0, 0.0, 0.0, 1.0),
            HealthBand::Wounded => Color::new(1.0, 1.0, 0.0, 1.0),
            HealthBand::Healthy => Color::new(0.0, 1.0, 0.0, 1.0),
        }
    }
}
