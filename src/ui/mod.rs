//! UI module - ratatui/crossterm terminal front end

pub mod audio;
pub mod keyboard;
pub mod screen;
pub mod state;
pub mod terminal;

pub use audio::TerminalAudio;
pub use keyboard::KeyboardInput;
pub use screen::TerminalPresentation;
pub use state::{LogCategory, LogEntry, Scene};
pub use terminal::TerminalSession;
