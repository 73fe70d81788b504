//! Terminal subsystem for PauyOS.
//!
//! Turns keyboard interrupts into an editable input line and runs the
//! finished line as a built-in command.
//!
//! # Architecture
//!
//! - `scancode`: make code to character translation
//! - `line`: fixed-capacity input buffer
//! - `commands`: built-in shell commands
//! - `shell`: the interrupt-driven pipeline tying them together

pub mod commands;
pub mod line;
pub mod scancode;
pub mod shell;

pub use commands::{Command, Flow};
pub use line::{InputLine, Line, MAX_INPUT_LENGTH};
pub use scancode::{translate, ScancodeTable, US_QWERTY};
pub use shell::Terminal;
