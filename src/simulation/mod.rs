//! Simulation context, tick loop and event log

pub mod events;
pub mod tick;

pub use events::{DuelEvent, DuelEventLog, DuelEventType};
pub use tick::DuelSimulation;
