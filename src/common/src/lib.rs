//! Types shared between the PauyOS kernel and its hardware abstraction layer.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod boot;
pub mod error;
pub mod irq;

pub use boot::{BootParams, MemoryRegion, MemoryRegionKind};
pub use error::KernelError;
pub use irq::{IrqLine, IrqMask};
