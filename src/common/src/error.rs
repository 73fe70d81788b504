//! System-wide error types for PauyOS.

use core::fmt;

/// Kernel error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KernelError {
    /// Interrupt line outside the 16 lines of the chained PICs
    InvalidIrqLine(u8),
    /// A global logger was installed already
    LoggerAlreadySet,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidIrqLine(line) => write!(f, "invalid IRQ line {}", line),
            KernelError::LoggerAlreadySet => write!(f, "logger already set"),
        }
    }
}
