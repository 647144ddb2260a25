//! Attack hitboxes and damage application

pub mod strike;

pub use strike::{resolve_strike, strike_rect, StrikeOutcome};
