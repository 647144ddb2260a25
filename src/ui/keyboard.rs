//! Keyboard input from crossterm
//!
//! Terminals that report key releases give true hold state. Others only send
//! presses and auto-repeats, so a key counts as held for a short latch after
//! its last event.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::error::{DuelError, Result};
use crate::input::{ActionSet, InputSource, LogicalAction};

/// Hold time assumed after a press when releases are not reported
pub const DEFAULT_LATCH: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct KeyboardInput {
    held: ActionSet,
    last_seen: [Option<Instant>; 6],
    reports_release: bool,
    latch: Duration,
    quit: bool,
}

impl KeyboardInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: ActionSet::empty(),
            last_seen: [None; 6],
            reports_release,
            latch: DEFAULT_LATCH,
            quit: false,
        }
    }

    pub fn with_latch(mut self, latch: Duration) -> Self {
        self.latch = latch;
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn map_key(code: KeyCode) -> Option<LogicalAction> {
        match code {
            KeyCode::Left => Some(LogicalAction::MoveLeft),
            KeyCode::Right => Some(LogicalAction::MoveRight),
            KeyCode::Up => Some(LogicalAction::Jump),
            KeyCode::Char(' ') => Some(LogicalAction::Attack),
            KeyCode::Esc => Some(LogicalAction::Pause),
            KeyCode::Enter => Some(LogicalAction::Confirm),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let quit = matches!(key.code, KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit && key.kind != KeyEventKind::Release {
            self.quit = true;
            return;
        }

        let Some(action) = Self::map_key(key.code) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(action);
                self.last_seen[action.index()] = Some(now);
            }
            KeyEventKind::Release => {
                self.held.remove(action);
                self.last_seen[action.index()] = None;
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(*key, now),
            // Focus loss would otherwise leave keys stuck
            Event::FocusLost => self.release_all(),
            _ => {}
        }
    }

    pub fn release_all(&mut self) {
        self.held = ActionSet::empty();
        self.last_seen = [None; 6];
    }

    /// Drop latched keys whose last event is older than the latch
    pub fn expire(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        for action in LogicalAction::ALL {
            let slot = action.index();
            if let Some(seen) = self.last_seen[slot] {
                if now.duration_since(seen) > self.latch {
                    self.held.remove(action);
                    self.last_seen[slot] = None;
                }
            }
        }
    }

    /// Drain pending terminal events, waiting at most `timeout` for the first
    pub fn poll(&mut self, timeout: Duration) -> Result<()> {
        let io = |e: std::io::Error| DuelError::Terminal(format!("input: {e}"));
        let mut wait = timeout;
        while event::poll(wait).map_err(io)? {
            let event = event::read().map_err(io)?;
            self.handle_event(&event, Instant::now());
            wait = Duration::ZERO;
        }
        self.expire(Instant::now());
        Ok(())
    }
}

impl InputSource for KeyboardInput {
    fn is_action_active(&self, action: LogicalAction) -> bool {
        self.held.contains(action)
    }
}
