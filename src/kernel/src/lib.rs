//! PauyOS Kernel
//!
//! A minimal x86_64 kernel whose only job is a keyboard-driven console.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: Platform-specific code (PIC, VGA, serial, interrupts)
//! - `terminal`: Scancode translation, the input line and built-in commands
//! - `boot`: Startup reporting (memory map, banner)
//! - `logger`: The `log` backend
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct. Only `arch` contains any.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_os = "none", feature(abi_x86_interrupt))]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod config;
pub mod logger;
pub mod terminal;
pub mod tests;

#[cfg(test)]
mod testutil;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up serial, the screen and the
/// IDT. Hardware interrupts stay disabled.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub fn init() {
    arch::x86_64::serial::init();
    arch::x86_64::vga::init();
    arch::x86_64::interrupts::init_idt();
}
