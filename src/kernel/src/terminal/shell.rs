//! Keyboard interrupt servicing: scancode to line to command.

use super::commands::{Command, Flow};
use super::line::InputLine;
use super::scancode::{ScancodeTable, BACKSPACE, ENTER, US_QWERTY};
use log::debug;
use pauyos_common::IrqLine;
use pauyos_hal::{Console, InterruptController, Port, PortIo, Processor};

/// PS/2 controller data port.
pub const PS2_DATA_PORT: Port = Port::new(0x60);

/// The console's input state.
///
/// One instance lives for the whole uptime and is driven only from the
/// keyboard interrupt handler. It is not meant to be shared with any other
/// execution context; a second reader would need its own synchronization.
#[derive(Debug)]
pub struct Terminal {
    line: InputLine,
    keymap: &'static ScancodeTable,
    halted: bool,
}

impl Terminal {
    /// Create a terminal using the US layout.
    pub const fn new() -> Self {
        Self::with_keymap(&US_QWERTY)
    }

    /// Create a terminal using the given layout.
    pub const fn with_keymap(keymap: &'static ScancodeTable) -> Self {
        Self {
            line: InputLine::new(),
            keymap,
            halted: false,
        }
    }

    /// Get the current input buffer.
    pub fn input(&self) -> &str {
        self.line.as_str()
    }

    /// Whether `exit` or `crash` has stopped the console.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Handles one keyboard interrupt.
    ///
    /// Reads the scancode, acknowledges the controller before doing any
    /// other work, then feeds the scancode through the pipeline.
    pub fn service_interrupt(
        &mut self,
        io: &mut impl PortIo,
        pic: &mut impl InterruptController,
        console: &mut impl Console,
        cpu: &mut impl Processor,
    ) {
        let scancode = io.read_byte(PS2_DATA_PORT);
        debug!(target: "keyboard", "IRQ1 fired, scancode {:#04x}", scancode);
        pic.end_of_interrupt(IrqLine::KEYBOARD);
        self.handle_scancode(scancode, console, cpu);
    }

    /// Feeds one raw scancode into the line buffer.
    ///
    /// Enter dispatches the finished line synchronously, then prints a
    /// newline unless the command stopped the processor.
    pub fn handle_scancode(
        &mut self,
        scancode: u8,
        console: &mut impl Console,
        cpu: &mut impl Processor,
    ) {
        if self.halted {
            return;
        }
        let Some(c) = self.keymap.translate(scancode) else {
            return;
        };
        match c {
            BACKSPACE => self.line.erase(console),
            ENTER => {
                let line = self.line.finalize();
                if Command::parse(line.as_str()).execute(console, cpu) == Flow::Halted {
                    self.halted = true;
                    return;
                }
                console.put_char(b'\n');
            }
            c => {
                self.line.append(c, console);
            }
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
