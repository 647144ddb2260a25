//! Computer-controlled opponent

pub mod controller;
pub mod tuning;

pub use controller::{AiController, AiMode};
pub use tuning::{AggressiveConfig, AiTuning, DefensiveConfig, NeutralConfig};
