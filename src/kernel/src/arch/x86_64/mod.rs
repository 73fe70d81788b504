//! x86_64 architecture support.
//!
//! The PIC configurator and the CRTC cursor helpers are written against
//! [`pauyos_hal::PortIo`] and build everywhere. The rest drives real
//! hardware and only exists on bare metal.

pub mod crtc;
pub mod pic;

#[cfg(target_os = "none")]
pub mod interrupts;
#[cfg(target_os = "none")]
pub mod port;
#[cfg(target_os = "none")]
pub mod serial;
#[cfg(target_os = "none")]
pub mod vga;

#[cfg(target_os = "none")]
pub use bare_metal::*;

#[cfg(target_os = "none")]
mod bare_metal {
    use super::{serial, vga};
    use core::fmt::{self, Write};
    use pauyos_hal::Processor;

    /// Halts the CPU until the next interrupt.
    ///
    /// Used in idle loops to reduce power consumption.
    #[inline]
    pub fn hlt() {
        x86_64::instructions::hlt();
    }

    /// Halts the CPU in an infinite loop.
    ///
    /// Used after unrecoverable errors (panics) and by `exit`.
    pub fn halt_loop() -> ! {
        loop {
            hlt();
        }
    }

    /// Writes a diagnostic to serial and, when the screen is free, to VGA.
    pub fn report(args: fmt::Arguments) {
        serial::_print(args);
        if let Some(mut writer) = vga::writer().try_lock() {
            let _ = writer.write_fmt(args);
        }
    }

    /// Reports an unrecoverable error on both outputs and halts for good.
    pub fn fatal(args: fmt::Arguments) -> ! {
        serial::_print(args);
        // SAFETY: this path ends in `halt_loop`; whatever held the screen
        // is never resumed.
        let mut writer = unsafe { vga::seize_writer() };
        writer.set_color(vga::Color::LightRed, vga::Color::Black);
        let _ = writer.write_fmt(args);
        halt_loop()
    }

    /// The running processor.
    #[derive(Debug, Default)]
    pub struct Cpu;

    impl Processor for Cpu {
        fn halt(&mut self) {
            halt_loop()
        }

        fn raise_fault(&mut self) {
            // SAFETY: dividing by zero raises #DE, whose handler never
            // returns. No memory is touched.
            unsafe {
                core::arch::asm!(
                    "xor edx, edx",
                    "xor ecx, ecx",
                    "div ecx",
                    out("eax") _,
                    out("ecx") _,
                    out("edx") _,
                    options(nomem, nostack),
                );
            }
        }
    }
}
