//! Round phases and scoring

pub mod manager;

pub use manager::{Phase, RoundManager, RoundOutcome, Scores};
