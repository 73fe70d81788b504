//! Port I/O through the `in`/`out` instructions.

use pauyos_hal::{Port, PortIo};
use x86_64::instructions::port::Port as RawPort;

/// Direct access to the x86 I/O port space.
#[derive(Debug)]
pub struct X86Ports {
    _private: (),
}

impl X86Ports {
    /// Creates a handle to the port space.
    ///
    /// # Safety
    ///
    /// Port writes can reprogram any device. The caller must run in ring 0
    /// and only hand the handle to drivers that know their ports.
    pub const unsafe fn new() -> Self {
        X86Ports { _private: () }
    }
}

impl PortIo for X86Ports {
    fn read_byte(&mut self, port: Port) -> u8 {
        // SAFETY: construction of `X86Ports` is unsafe; whoever built this
        // handle vouched for the ports it will be used with.
        unsafe { RawPort::<u8>::new(port.number()).read() }
    }

    fn write_byte(&mut self, port: Port, value: u8) {
        // SAFETY: see `read_byte`.
        unsafe { RawPort::<u8>::new(port.number()).write(value) }
    }
}
