//! Non-blocking keyboard stop poll using crossterm.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use fibts_core::StopSignal;
use tracing::{debug, warn};

/// Stops the run when the stop key (or Ctrl+C) is pressed.
///
/// Raw mode is on for as long as this value lives so single key presses
/// arrive without Enter.
pub struct KeyboardStop {
    key: char,
}

impl KeyboardStop {
    pub fn enable(key: char) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        debug!("raw mode enabled, stop key '{key}'");
        Ok(Self { key })
    }
}

impl StopSignal for KeyboardStop {
    fn stop_requested(&mut self) -> bool {
        let mut stop = false;
        // Drain everything queued since the last poll.
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => stop |= is_stop_key(&key, self.key),
                    Ok(_) => {}
                    Err(e) => {
                        warn!("failed to read key event: {e}");
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("failed to poll key events: {e}");
                    break;
                }
            }
        }
        stop
    }
}

impl Drop for KeyboardStop {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// True for a press of `key` in either case, or Ctrl+C.
pub fn is_stop_key(event: &KeyEvent, key: char) -> bool {
    if event.kind != KeyEventKind::Press {
        return false;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&key),
        _ => false,
    }
}
