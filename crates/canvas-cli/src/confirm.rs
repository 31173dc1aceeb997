//! Confirmation gate: one raw keystroke decides whether the run starts.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

pub trait Confirm {
    /// True to proceed, false to cancel.
    fn confirm(&mut self) -> io::Result<bool>;
}

/// Reads a single key from the terminal in raw mode. Enter proceeds; any
/// other key (Ctrl+C included) cancels.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self) -> io::Result<bool> {
        terminal::enable_raw_mode()?;
        let _restore = RawModeGuard;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(is_proceed(key.code));
                }
                _ => continue,
            }
        }
    }
}

/// `--yes`: always proceed.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self) -> io::Result<bool> {
        Ok(true)
    }
}

pub fn is_proceed(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char('\r') | KeyCode::Char('\n'))
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_enter_proceeds() {
        assert!(is_proceed(KeyCode::Enter));
        assert!(is_proceed(KeyCode::Char('\n')));
        assert!(!is_proceed(KeyCode::Char('y')));
        assert!(!is_proceed(KeyCode::Esc));
        assert!(!is_proceed(KeyCode::Char('c')));
    }

    #[test]
    fn assume_yes_proceeds() {
        assert!(AssumeYes.confirm().unwrap());
    }
}
