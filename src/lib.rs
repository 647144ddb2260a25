//! Duel Arena - Two-fighter arcade duel against a scripted AI

pub mod ai;
pub mod combat;
pub mod core;
pub mod fighter;
pub mod input;
pub mod render;
pub mod round;
pub mod simulation;
pub mod ui;
