//! Fixed-capacity input line.

use super::scancode::BACKSPACE;
use core::fmt;
use pauyos_hal::Console;

/// Capacity of the input buffer, including the terminator slot.
pub const MAX_INPUT_LENGTH: usize = 100;

/// The line being typed.
///
/// Holds at most `MAX_INPUT_LENGTH - 1` characters; the last slot is kept
/// for the terminator written by [`InputLine::finalize`]. Only ASCII is
/// stored. Owned by the keyboard interrupt path alone.
#[derive(Debug, Clone)]
pub struct InputLine {
    bytes: [u8; MAX_INPUT_LENGTH],
    len: usize,
}

impl InputLine {
    /// Creates an empty line.
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_INPUT_LENGTH],
            len: 0,
        }
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next append would be dropped.
    pub fn is_full(&self) -> bool {
        self.len >= MAX_INPUT_LENGTH - 1
    }

    /// The characters typed so far.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Buffers `c` and echoes it.
    ///
    /// A full line or a non-ASCII character drops `c` silently; returns
    /// whether it was stored.
    pub fn append(&mut self, c: char, console: &mut impl Console) -> bool {
        if self.is_full() || !c.is_ascii() {
            return false;
        }
        let byte = c as u8;
        self.bytes[self.len] = byte;
        self.len += 1;
        console.put_char(byte);
        true
    }

    /// Removes the last character and echoes a backspace.
    ///
    /// The backspace is echoed even when the line is already empty.
    pub fn erase(&mut self, console: &mut impl Console) {
        self.len = self.len.saturating_sub(1);
        console.put_char(BACKSPACE as u8);
    }

    /// Terminates the line, hands back a snapshot and resets to empty.
    pub fn finalize(&mut self) -> Line {
        self.bytes[self.len] = 0;
        let line = Line {
            bytes: self.bytes,
            len: self.len,
        };
        self.len = 0;
        line
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

/// A finalized input line.
#[derive(Clone, Copy)]
pub struct Line {
    bytes: [u8; MAX_INPUT_LENGTH],
    len: usize,
}

impl Line {
    /// The line text, without the terminator.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// The raw bytes including the terminator.
    #[cfg(test)]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Line").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingConsole;

    fn typed(text: &str) -> (InputLine, RecordingConsole) {
        let mut line = InputLine::new();
        let mut console = RecordingConsole::new();
        for c in text.chars() {
            line.append(c, &mut console);
        }
        (line, console)
    }

    #[test]
    fn append_stores_and_echoes() {
        let (line, console) = typed("ls -l");
        assert_eq!(line.as_str(), "ls -l");
        assert_eq!(line.len(), 5);
        assert_eq!(console.output, "ls -l");
    }

    #[test]
    fn overflow_drops_characters_past_capacity() {
        let mut line = InputLine::new();
        let mut console = RecordingConsole::new();
        let stored = (0..MAX_INPUT_LENGTH + 50)
            .filter(|_| line.append('a', &mut console))
            .count();
        assert_eq!(stored, MAX_INPUT_LENGTH - 1);
        assert_eq!(line.len(), MAX_INPUT_LENGTH - 1);
        assert!(line.is_full());
        assert_eq!(console.output.len(), MAX_INPUT_LENGTH - 1);
    }

    #[test]
    fn non_ascii_is_dropped() {
        let (line, console) = typed("é");
        assert!(line.is_empty());
        assert!(console.output.is_empty());
    }

    #[test]
    fn erase_removes_last_character() {
        let (mut line, mut console) = typed("ab");
        line.erase(&mut console);
        assert_eq!(line.as_str(), "a");
        assert_eq!(console.output, "ab\x08");
    }

    #[test]
    fn erase_on_empty_line_still_echoes_backspace() {
        let mut line = InputLine::new();
        let mut console = RecordingConsole::new();
        line.erase(&mut console);
        line.erase(&mut console);
        assert_eq!(line.len(), 0);
        assert_eq!(console.output, "\x08\x08");
    }

    #[test]
    fn erase_frees_room_on_a_full_line() {
        let mut line = InputLine::new();
        let mut console = RecordingConsole::new();
        for _ in 0..MAX_INPUT_LENGTH {
            line.append('x', &mut console);
        }
        line.erase(&mut console);
        assert!(line.append('y', &mut console));
        assert!(line.as_str().ends_with("xy"));
    }

    #[test]
    fn finalize_terminates_and_resets() {
        let (mut line, _) = typed("echo hi");
        let done = line.finalize();
        assert_eq!(done.as_str(), "echo hi");
        assert_eq!(done.as_bytes_with_nul(), b"echo hi\0");
        assert!(line.is_empty());
        assert_eq!(line.as_str(), "");
    }

    #[test]
    fn consecutive_lines_do_not_share_characters() {
        let (mut line, mut console) = typed("clear");
        let first = line.finalize();
        line.append('x', &mut console);
        let second = line.finalize();
        assert_eq!(first.as_str(), "clear");
        assert_eq!(second.as_str(), "x");
    }

    #[test]
    fn finalize_of_a_full_line_keeps_every_character() {
        let mut line = InputLine::new();
        let mut console = RecordingConsole::new();
        for _ in 0..MAX_INPUT_LENGTH * 2 {
            line.append('z', &mut console);
        }
        let done = line.finalize();
        assert_eq!(done.as_str().len(), MAX_INPUT_LENGTH - 1);
        assert_eq!(done.as_bytes_with_nul().last(), Some(&0));
    }
}
