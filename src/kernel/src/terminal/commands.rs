//! Built-in shell commands.

use crate::config::{SCREEN_COLUMNS, SCREEN_ROWS, SHUTDOWN_MESSAGE};
use log::{error, info};
use pauyos_hal::{Console, Processor};

const TARGET: &str = "kernel";

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Fault the processor on purpose.
    Crash,
    /// Blank the screen.
    Clear,
    /// Print the text after `echo `.
    Echo(&'a str),
    /// Shut down.
    Exit,
    /// Anything else; ignored.
    Unrecognized,
}

/// What happens to the console after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading keys.
    Continue,
    /// The processor was stopped; nothing more will be read.
    Halted,
}

impl<'a> Command<'a> {
    /// Parse a command from a finalized line.
    ///
    /// `crash`, `clear` and `exit` must match exactly. Anything starting with
    /// `echo` is an echo: the text after `echo ` is printed, and a line
    /// with no space right after the keyword echoes nothing.
    pub fn parse(line: &'a str) -> Command<'a> {
        match line {
            "crash" => Command::Crash,
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            _ => match line.strip_prefix("echo") {
                Some(rest) => Command::Echo(rest.strip_prefix(' ').unwrap_or_default()),
                None => Command::Unrecognized,
            },
        }
    }

    /// Execute a command.
    pub fn execute(self, console: &mut impl Console, cpu: &mut impl Processor) -> Flow {
        match self {
            Command::Crash => {
                error!(target: TARGET, "User has crashed the system!");
                cpu.raise_fault();
                Flow::Halted
            }
            Command::Clear => {
                clear_screen(console);
                Flow::Continue
            }
            Command::Echo(text) => {
                console.write_str(text);
                console.put_char(b'\n');
                Flow::Continue
            }
            Command::Exit => {
                info!(target: TARGET, "Shutting down system...");
                clear_screen(console);
                console.write_str(SHUTDOWN_MESSAGE);
                cpu.halt();
                Flow::Halted
            }
            Command::Unrecognized => Flow::Continue,
        }
    }
}

/// Fills every cell with a blank, then parks the cursor above row 0.
pub fn clear_screen(console: &mut impl Console) {
    console.set_cursor_position(0, 0);
    for _ in 0..SCREEN_ROWS * SCREEN_COLUMNS {
        console.put_char(b' ');
    }
    console.set_cursor_position(0, -1);
}
