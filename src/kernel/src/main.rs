//! PauyOS Kernel Entry Point
//!
//! This is the main entry point for the PauyOS kernel. Host builds get an
//! empty `main` so the workspace still builds and tests off target.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use bootloader::bootinfo::{MemoryMap, MemoryRegionType};
    use bootloader::{entry_point, BootInfo};
    use core::panic::PanicInfo;
    use log::{info, warn};
    use pauyos_common::{BootParams, MemoryRegion, MemoryRegionKind};
    use pauyos_hal::Console;
    use pauyos_kernel::arch::x86_64::pic::InterruptIndex;
    use pauyos_kernel::arch::x86_64::{self as arch, interrupts::PICS, vga};
    use pauyos_kernel::config::{MAX_MEMORY_REGIONS, PROMPT_ROW};
    use pauyos_kernel::terminal::commands::clear_screen;
    use pauyos_kernel::{boot, logger, serial_println};

    entry_point!(kernel_main);

    /// Kernel entry point.
    ///
    /// Called by the bootloader after setting up the initial environment.
    fn kernel_main(boot_info: &'static BootInfo) -> ! {
        pauyos_kernel::init();
        if let Err(err) = logger::init() {
            serial_println!("logger: {}", err);
        }

        let mut regions = [MemoryRegion::EMPTY; MAX_MEMORY_REGIONS];
        let count = collect_regions(&boot_info.memory_map, &mut regions);
        // The loader does not say which drive it came from.
        boot::log_boot_params(&BootParams::new(None, &regions[..count]));

        {
            let mut pics = PICS.lock();
            boot::configure_interrupts(&mut *pics);
            let keyboard = InterruptIndex::Keyboard;
            let mask = pics.mask();
            if !pics.handles_interrupt(keyboard.as_u8()) || !mask.is_enabled(keyboard.line()) {
                let (master, slave) = pics.offsets();
                warn!(
                    target: "kernel",
                    "keyboard vector {:#x} not routed (PIC at {:#x}/{:#x}, mask {:#06x})",
                    keyboard.as_u8(),
                    master,
                    slave,
                    mask.bits()
                );
            }
        }

        #[cfg(feature = "self_test")]
        pauyos_kernel::tests::run_all();

        vga::with_writer(|writer| {
            clear_screen(writer);
            boot::banner::print_banner(writer);
            writer.set_cursor_position(0, PROMPT_ROW);
        });
        info!(target: "kernel", "Set cursor position!");

        x86_64::instructions::interrupts::enable();
        arch::halt_loop()
    }

    /// Copies the loader's memory map into `out`, returning the entry count.
    fn collect_regions(map: &MemoryMap, out: &mut [MemoryRegion]) -> usize {
        let total = map.iter().count();
        if total > out.len() {
            warn!(target: "boot", "memory map truncated to {} of {} regions", out.len(), total);
        }
        let mut count = 0;
        for (slot, region) in out.iter_mut().zip(map.iter()) {
            let begin = region.range.start_addr();
            *slot = MemoryRegion::new(
                begin,
                region.range.end_addr() - begin,
                region_kind(region.region_type),
            );
            count += 1;
        }
        count
    }

    fn region_kind(region_type: MemoryRegionType) -> MemoryRegionKind {
        match region_type {
            MemoryRegionType::Usable => MemoryRegionKind::Usable,
            MemoryRegionType::AcpiReclaimable => MemoryRegionKind::AcpiReclaimable,
            MemoryRegionType::AcpiNvs => MemoryRegionKind::AcpiNvs,
            MemoryRegionType::BadMemory => MemoryRegionKind::BadMemory,
            _ => MemoryRegionKind::Reserved,
        }
    }

    /// Panic handler.
    ///
    /// Called when the kernel encounters an unrecoverable error.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        arch::fatal(format_args!("\n\n!!! KERNEL PANIC !!!\n{}\n", info))
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
