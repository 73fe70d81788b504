//! Boot-time reporting.
//!
//! The startup parameters are logged once and not used for anything else.

pub mod banner;

use log::{debug, info};
use pauyos_common::{BootParams, IrqLine};
use pauyos_hal::InterruptController;

const TARGET: &str = "boot";

/// Logs the boot device and every memory region.
pub fn log_boot_params(params: &BootParams<'_>) {
    match params.boot_device {
        Some(device) => debug!(target: TARGET, "Boot device: {:#x}", device),
        None => debug!(target: TARGET, "Boot device: unknown"),
    }
    debug!(target: TARGET, "Memory region count: {}", params.regions.len());
    for region in params.regions {
        debug!(
            target: TARGET,
            "MEM: start={:#x} length={:#x} type={:#x} ({})",
            region.begin,
            region.length,
            region.kind.e820(),
            region.kind
        );
    }
    info!(
        target: TARGET,
        "{} KiB usable memory",
        params.usable_bytes() / 1024
    );
}

/// Moves the PIC vectors past the CPU exceptions and enables only the keyboard.
///
/// Must run with interrupts disabled.
#[cfg(target_arch = "x86_64")]
pub fn configure_interrupts(pic: &mut impl InterruptController) {
    use crate::arch::x86_64::pic::{PIC_1_OFFSET, PIC_2_OFFSET};

    pic.remap(PIC_1_OFFSET, PIC_2_OFFSET);
    pic.unmask(IrqLine::KEYBOARD);
    info!(
        target: "kernel",
        "PIC remapped to {:#x}/{:#x}, IRQ{} unmasked",
        PIC_1_OFFSET,
        PIC_2_OFFSET,
        IrqLine::KEYBOARD.number()
    );
}
