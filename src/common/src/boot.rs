//! The startup parameter object handed over by the bootloader.
//!
//! The kernel only reports these values; nothing is allocated from them.

use core::fmt;

/// Type of a physical memory region, using the BIOS E820 numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegionKind {
    /// Free RAM.
    Usable,
    /// Reserved by firmware, devices or the boot image.
    Reserved,
    /// ACPI tables, reclaimable after parsing.
    AcpiReclaimable,
    /// ACPI non-volatile storage.
    AcpiNvs,
    /// Defective RAM.
    BadMemory,
    /// A type code the kernel does not know.
    Unknown(u32),
}

impl MemoryRegionKind {
    /// Maps an E820 type code.
    pub const fn from_e820(code: u32) -> Self {
        match code {
            1 => Self::Usable,
            2 => Self::Reserved,
            3 => Self::AcpiReclaimable,
            4 => Self::AcpiNvs,
            5 => Self::BadMemory,
            other => Self::Unknown(other),
        }
    }

    /// Returns the E820 type code.
    pub const fn e820(self) -> u32 {
        match self {
            Self::Usable => 1,
            Self::Reserved => 2,
            Self::AcpiReclaimable => 3,
            Self::AcpiNvs => 4,
            Self::BadMemory => 5,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for MemoryRegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usable => write!(f, "usable"),
            Self::Reserved => write!(f, "reserved"),
            Self::AcpiReclaimable => write!(f, "acpi-reclaimable"),
            Self::AcpiNvs => write!(f, "acpi-nvs"),
            Self::BadMemory => write!(f, "bad"),
            Self::Unknown(code) => write!(f, "unknown({:#x})", code),
        }
    }
}

/// A contiguous range of physical memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Physical start address.
    pub begin: u64,
    /// Length in bytes.
    pub length: u64,
    /// What the firmware says the range holds.
    pub kind: MemoryRegionKind,
}

impl MemoryRegion {
    /// Placeholder used to fill fixed-size region arrays.
    pub const EMPTY: MemoryRegion = MemoryRegion {
        begin: 0,
        length: 0,
        kind: MemoryRegionKind::Reserved,
    };

    /// Creates a region.
    pub const fn new(begin: u64, length: u64, kind: MemoryRegionKind) -> Self {
        Self {
            begin,
            length,
            kind,
        }
    }
}

/// Read-only startup parameters.
#[derive(Debug, Clone, Copy)]
pub struct BootParams<'a> {
    /// BIOS drive number the kernel was loaded from, when the loader reports it.
    pub boot_device: Option<u8>,
    /// Memory map in the order the loader produced it.
    pub regions: &'a [MemoryRegion],
}

impl<'a> BootParams<'a> {
    /// Creates the parameter object.
    pub const fn new(boot_device: Option<u8>, regions: &'a [MemoryRegion]) -> Self {
        Self {
            boot_device,
            regions,
        }
    }

    /// Total bytes across all usable regions.
    pub fn usable_bytes(&self) -> u64 {
        self.regions
            .iter()
            .filter(|region| region.kind == MemoryRegionKind::Usable)
            .map(|region| region.length)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn e820_codes_survive_the_enum() {
        for code in 1..=7 {
            assert_eq!(MemoryRegionKind::from_e820(code).e820(), code);
        }
        assert_eq!(MemoryRegionKind::from_e820(9), MemoryRegionKind::Unknown(9));
    }

    #[test]
    fn usable_bytes_skips_reserved_ranges() {
        let regions = [
            MemoryRegion::new(0, 0x9_fc00, MemoryRegionKind::Usable),
            MemoryRegion::new(0x9_fc00, 0x400, MemoryRegionKind::Reserved),
            MemoryRegion::new(0x10_0000, 0x7ee_0000, MemoryRegionKind::Usable),
        ];
        let params = BootParams::new(Some(0x80), &regions);
        assert_eq!(params.usable_bytes(), 0x9_fc00 + 0x7ee_0000);
    }

    #[test]
    fn kinds_render_for_the_boot_log() {
        assert_eq!(MemoryRegionKind::AcpiNvs.to_string(), "acpi-nvs");
        assert_eq!(MemoryRegionKind::Unknown(0xc).to_string(), "unknown(0xc)");
    }
}
