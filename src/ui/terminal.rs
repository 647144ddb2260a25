//! Raw-mode terminal session
//!
//! Entering the session switches to the alternate screen and, where the
//! terminal supports it, asks for key release events. Dropping it restores
//! the terminal even when the game loop bails out with an error.

use std::io::{self, Stdout};

use crossterm::event::{
    DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::core::error::{DuelError, Result};

fn terminal_error(context: &str) -> impl Fn(io::Error) -> DuelError + '_ {
    move |e| DuelError::Terminal(format!("{context}: {e}"))
}

pub struct TerminalSession {
    reports_release: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<(Self, Terminal<CrosstermBackend<Stdout>>)> {
        enable_raw_mode().map_err(terminal_error("raw mode"))?;
        // From here on, an early return restores the terminal through Drop
        let mut session = Self {
            reports_release: false,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)
            .map_err(terminal_error("alternate screen"))?;

        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(terminal_error("keyboard enhancement"))?;
            session.reports_release = true;
        }
        tracing::info!(
            reports_release = session.reports_release,
            "terminal session started"
        );

        let mut terminal =
            Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error("terminal"))?;
        terminal.hide_cursor().map_err(terminal_error("cursor"))?;
        terminal.clear().map_err(terminal_error("clear"))?;

        Ok((session, terminal))
    }

    /// Whether key releases are reported (otherwise input uses a latch)
    pub fn reports_release(&self) -> bool {
        self.reports_release
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.reports_release {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            stdout,
            DisableFocusChange,
            LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        let _ = disable_raw_mode();
    }
}
