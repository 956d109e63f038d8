//! Per-frame button latch for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a press (or auto-repeat) marks the button held, and it stays held until a
//! release arrives or the timeout passes with no new press.
//!
//! A press that is both made and released between two samples is still
//! reported as held for one sample, so quick taps of Start are never lost.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Button, InputState};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct InputLatch {
    /// Time of the most recent press or repeat per button, while held.
    last_seen: [Option<Instant>; 6],
    /// Pressed since the last sample, even if already released.
    tapped: [bool; 6],
    release_timeout: Duration,
}

impl InputLatch {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 6],
            tapped: [false; 6],
            release_timeout: DEFAULT_KEY_RELEASE_TIMEOUT,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn press(&mut self, button: Button, now: Instant) {
        let i = button.index();
        self.last_seen[i] = Some(now);
        self.tapped[i] = true;
    }

    /// Terminal auto-repeat: keep the button alive without counting a new tap.
    pub fn repeat(&mut self, button: Button, now: Instant) {
        self.last_seen[button.index()] = Some(now);
    }

    pub fn release(&mut self, button: Button) {
        self.last_seen[button.index()] = None;
    }

    /// Feed one key event. Returns the button it mapped to, if any.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<Button> {
        let button = map_key(key)?;
        match key.kind {
            KeyEventKind::Press => self.press(button, now),
            KeyEventKind::Repeat => self.repeat(button, now),
            KeyEventKind::Release => self.release(button),
        }
        Some(button)
    }

    /// Sample the buttons for one frame.
    pub fn sample(&mut self, now: Instant) -> InputState {
        let mut input = InputState::NONE;
        for button in Button::ALL {
            let i = button.index();
            if let Some(seen) = self.last_seen[i] {
                if now.saturating_duration_since(seen) > self.release_timeout {
                    log::trace!("{} timed out without release", button.as_str());
                    self.last_seen[i] = None;
                }
            }
            input.set(button, self.last_seen[i].is_some() || self.tapped[i]);
            self.tapped[i] = false;
        }
        input
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 6];
        self.tapped = [false; 6];
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}
