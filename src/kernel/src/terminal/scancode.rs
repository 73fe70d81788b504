//! Scancode set 1 translation for a US QWERTY keyboard.
//!
//! Only make codes (0x00..=0x7F) carry a character. Modifier state is not
//! tracked: every key yields its unshifted glyph and the modifier keys
//! themselves yield nothing.

/// Character produced by the backspace key.
pub const BACKSPACE: char = '\x08';

/// Character produced by the enter key.
pub const ENTER: char = '\n';

/// Set on every break (key release) code.
const RELEASE_BIT: u8 = 0x80;

/// Number of make codes.
pub const MAKE_CODES: usize = 128;

/// Table entry meaning "this key produces no character".
const UNMAPPED: u8 = 0;

/// Fixed mapping from make code to ASCII.
#[derive(Debug, Clone)]
pub struct ScancodeTable {
    map: [u8; MAKE_CODES],
}

/// The single layout the kernel ships.
pub const US_QWERTY: ScancodeTable = ScancodeTable::new(us_qwerty());

const fn us_qwerty() -> [u8; MAKE_CODES] {
    let map = fill([UNMAPPED; MAKE_CODES], 0x02, b"1234567890-=\x08\tqwertyuiop[]\n");
    let map = fill(map, 0x1E, b"asdfghjkl;'`");
    let map = fill(map, 0x2B, b"\\zxcvbnm,./");
    let map = fill(map, 0x37, b"*");
    fill(map, 0x39, b" ")
}

const fn fill(mut map: [u8; MAKE_CODES], first: usize, keys: &[u8]) -> [u8; MAKE_CODES] {
    let mut i = 0;
    while i < keys.len() {
        map[first + i] = keys[i];
        i += 1;
    }
    map
}

impl ScancodeTable {
    /// Wraps a raw table; zero entries are unmapped.
    pub const fn new(map: [u8; MAKE_CODES]) -> Self {
        Self { map }
    }

    /// Maps a raw scancode to the character it produces, if any.
    pub fn translate(&self, code: u8) -> Option<char> {
        if code & RELEASE_BIT != 0 {
            return None;
        }
        match self.map[usize::from(code)] {
            UNMAPPED => None,
            byte => Some(char::from(byte)),
        }
    }

    /// Reverse lookup: the make code that produces `c`.
    #[cfg(test)]
    pub fn scancode_for(&self, c: char) -> Option<u8> {
        let byte = u8::try_from(c).ok().filter(|&b| b != UNMAPPED)?;
        self.map
            .iter()
            .position(|&entry| entry == byte)
            .and_then(|code| u8::try_from(code).ok())
    }
}

/// Translates `code` with the built-in US layout.
pub fn translate(code: u8) -> Option<char> {
    US_QWERTY.translate(code)
}
