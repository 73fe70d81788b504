//! Kernel logger backing the `log` facade.
//!
//! Records are rendered as `[LEVEL] target: message` lines. On bare metal
//! they go to COM1. Host test builds capture them per thread; other host
//! builds drop them.

use crate::config;
use core::fmt::{self, Write};
use log::{Level, Log, Metadata, Record};
use pauyos_common::KernelError;

/// Logger writing every enabled record to the serial port.
pub struct KernelLogger;

static LOGGER: KernelLogger = KernelLogger;

/// Installs the kernel logger and applies the configured level filter.
pub fn init() -> Result<(), KernelError> {
    log::set_logger(&LOGGER).map_err(|_| KernelError::LoggerAlreadySet)?;
    log::set_max_level(config::LOG_LEVEL);
    Ok(())
}

/// Renders one record as a single line.
pub fn write_record<W: Write + ?Sized>(
    out: &mut W,
    level: Level,
    target: &str,
    args: &fmt::Arguments<'_>,
) -> fmt::Result {
    writeln!(out, "[{:<5}] {}: {}", level, target, args)
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            sink(|out| write_record(out, record.level(), record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
fn sink(render: impl FnOnce(&mut dyn Write) -> fmt::Result) {
    crate::arch::x86_64::serial::with_port(|port| {
        let _ = render(port);
    });
}

#[cfg(all(test, not(target_os = "none")))]
fn sink(render: impl FnOnce(&mut dyn Write) -> fmt::Result) {
    crate::testutil::capture_record(render);
}

#[cfg(not(any(test, all(target_arch = "x86_64", target_os = "none"))))]
fn sink(_render: impl FnOnce(&mut dyn Write) -> fmt::Result) {}
