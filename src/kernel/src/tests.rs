//! Boot-time self checks.
//!
//! Run before interrupts are enabled when the `self_test` feature is on.
//! They exercise the console pipeline against a throwaway console, so a
//! broken build is caught on the serial log before the first keypress.

use crate::terminal::{translate, Command, InputLine, MAX_INPUT_LENGTH};
use log::info;
use pauyos_hal::Console;

const TARGET: &str = "selftest";

/// Console that only counts what it is given.
#[derive(Default)]
struct CountingConsole {
    chars: usize,
    cursor_moves: usize,
}

impl Console for CountingConsole {
    fn put_char(&mut self, _byte: u8) {
        self.chars += 1;
    }

    fn set_cursor_position(&mut self, _x: i32, _y: i32) {
        self.cursor_moves += 1;
    }
}

/// Runs all self checks, panicking on the first failure.
pub fn run_all() {
    info!(target: TARGET, "Running kernel self checks...");

    test_break_codes();
    test_line_capacity();
    test_command_parsing();

    info!(target: TARGET, "All kernel self checks passed!");
}

fn test_break_codes() {
    info!(target: TARGET, "test_break_codes... ");
    assert!((0x80..=0xFF).all(|code| translate(code).is_none()));
    assert_eq!(translate(0x1C), Some('\n'));
    info!(target: TARGET, "[ok]");
}

fn test_line_capacity() {
    info!(target: TARGET, "test_line_capacity... ");
    let mut line = InputLine::new();
    let mut console = CountingConsole::default();
    for _ in 0..MAX_INPUT_LENGTH + 10 {
        line.append('k', &mut console);
    }
    assert_eq!(line.len(), MAX_INPUT_LENGTH - 1);
    assert_eq!(console.chars, MAX_INPUT_LENGTH - 1);

    let finished = line.finalize();
    assert_eq!(finished.as_str().len(), MAX_INPUT_LENGTH - 1);
    assert!(line.is_empty());

    line.erase(&mut console);
    assert!(line.is_empty());
    assert_eq!(console.cursor_moves, 0);
    info!(target: TARGET, "[ok]");
}

fn test_command_parsing() {
    info!(target: TARGET, "test_command_parsing... ");
    assert_eq!(Command::parse("clear"), Command::Clear);
    assert_eq!(Command::parse("echo ok"), Command::Echo("ok"));
    assert_eq!(Command::parse("halt"), Command::Unrecognized);
    info!(target: TARGET, "[ok]");
}

#[cfg(test)]
mod unit {
    #[test]
    fn self_checks_pass_on_the_host() {
        super::run_all();
    }
}
