//! Presentation layer for the duel
//!
//! Provides the frame driver and the sinks it paints and plays through.
//! This module is READ-ONLY with respect to the simulation: it never changes
//! fighter or round state.

pub mod audio;
pub mod colors;
pub mod driver;
pub mod sprites;

pub use audio::{cues_for, AudioCue, AudioSink, NullAudio, RecordingAudio};
pub use colors::{Color, HealthBand};
pub use driver::{FrameDriver, Overlay};
pub use sprites::{SpriteFrame, SpriteLibrary, SpriteManifest};

use crate::core::config::ArenaConfig;
use crate::core::error::Result;
use crate::core::types::{Rect, Slot};

/// A display surface the frame driver paints on.
///
/// Calls for one tick arrive as `render_background`, sprites, hitboxes and
/// the overlay, closed by `finish_frame`. HUD setters may arrive at any time.
pub trait Presentation {
    fn render_background(&mut self, arena: &ArenaConfig);

    fn render_sprite(&mut self, sprite: &SpriteFrame);

    /// Debug outline of a body or strike box
    fn render_hitbox(&mut self, _slot: Slot, _rect: Rect) {}

    fn render_overlay(&mut self, overlay: &Overlay);

    fn set_health_display(&mut self, slot: Slot, health: u8, band: HealthBand);

    fn set_score_display(&mut self, slot: Slot, score: u32);

    fn show_result_screen(&mut self, winner_label: &str);

    fn hide_result_screen(&mut self);

    /// Flush the finished frame to the surface
    fn finish_frame(&mut self) -> Result<()> {
        Ok(())
    }
}
