//! PauyOS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines traits that abstract away platform-specific hardware details,
//! so the console pipeline can run against recording fakes on a development host.

#![no_std]

use pauyos_common::IrqLine;

/// An I/O port address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Wraps a raw port number.
    pub const fn new(number: u16) -> Self {
        Port(number)
    }

    /// Returns the raw port number.
    pub const fn number(self) -> u16 {
        self.0
    }
}

/// Byte-wide port-mapped register access.
///
/// Implementations for real hardware perform the access immediately and
/// synchronously; the order of calls is the order seen by the device.
pub trait PortIo {
    /// Reads one byte from `port`.
    fn read_byte(&mut self, port: Port) -> u8;
    /// Writes one byte to `port`.
    fn write_byte(&mut self, port: Port, value: u8);
}

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a single character cell, interpreting `\n`, `\t` and backspace.
    fn put_char(&mut self, byte: u8);

    /// Moves the cursor to column `x`, row `y`.
    ///
    /// `y == -1` parks the cursor above the first row; the surface moves it
    /// onto row 0 with the next newline or glyph.
    fn set_cursor_position(&mut self, x: i32, y: i32);

    /// Writes a string to the console.
    fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }
}

/// Trait for the chained interrupt controllers.
pub trait InterruptController {
    /// Reprograms both controllers so IRQ 0..=7 land on `master_offset..`
    /// and IRQ 8..=15 on `slave_offset..`, then masks every line.
    fn remap(&mut self, master_offset: u8, slave_offset: u8);
    /// Clears the mask bit of `line`, leaving every other line untouched.
    fn unmask(&mut self, line: IrqLine);
    /// Signals the end of an interrupt to the controller.
    fn end_of_interrupt(&mut self, line: IrqLine);
}

/// Terminal processor states.
///
/// Hardware implementations never return from either method. Test doubles
/// do, so callers must treat the return as "execution ended here".
pub trait Processor {
    /// Stops the processor in its low-power wait state for good.
    fn halt(&mut self);
    /// Triggers a fatal CPU exception on purpose.
    fn raise_fault(&mut self);
}
