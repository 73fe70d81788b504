//! Hardware interrupt lines of the chained 8259 PICs.

use crate::error::KernelError;
use bitflags::bitflags;

/// Number of lines served by a master/slave PIC pair.
pub const IRQ_LINES: u8 = 16;

/// A hardware interrupt line, 0..=15.
///
/// Lines 0..=7 belong to the master controller, 8..=15 to the slave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqLine(u8);

impl IrqLine {
    /// PS/2 keyboard.
    pub const KEYBOARD: IrqLine = IrqLine(1);
    /// Cascade input from the slave controller.
    pub const CASCADE: IrqLine = IrqLine(2);

    /// Creates a line number, rejecting anything past the slave controller.
    pub const fn new(line: u8) -> Result<Self, KernelError> {
        if line < IRQ_LINES {
            Ok(IrqLine(line))
        } else {
            Err(KernelError::InvalidIrqLine(line))
        }
    }

    /// Returns the raw line number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Whether this line is wired to the slave controller.
    pub const fn is_slave(self) -> bool {
        self.0 >= 8
    }

    /// Bit index inside the owning controller's 8-bit mask register.
    pub const fn mask_bit(self) -> u8 {
        self.0 % 8
    }
}

bitflags! {
    /// Mask state of all 16 lines. A set bit means the line is masked.
    ///
    /// The low byte mirrors the master data port, the high byte the slave.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IrqMask: u16 {
        const TIMER    = 1 << 0;
        const KEYBOARD = 1 << 1;
        const CASCADE  = 1 << 2;
        const COM2     = 1 << 3;
        const COM1     = 1 << 4;
        const LPT2     = 1 << 5;
        const FLOPPY   = 1 << 6;
        const LPT1     = 1 << 7;
        const RTC      = 1 << 8;
        const ACPI     = 1 << 9;
        const SPARE_10 = 1 << 10;
        const SPARE_11 = 1 << 11;
        const MOUSE    = 1 << 12;
        const FPU      = 1 << 13;
        const ATA1     = 1 << 14;
        const ATA2     = 1 << 15;
    }
}

impl IrqMask {
    /// The mask bit for a single line.
    pub const fn line(line: IrqLine) -> Self {
        Self::from_bits_retain(1 << line.number())
    }

    /// Builds the mask from the two controllers' data-port values.
    pub const fn from_ports(master: u8, slave: u8) -> Self {
        Self::from_bits_retain(u16::from_le_bytes([master, slave]))
    }

    /// Splits the mask into `(master, slave)` data-port values.
    pub const fn to_ports(self) -> (u8, u8) {
        let [master, slave] = self.bits().to_le_bytes();
        (master, slave)
    }

    /// Whether the given line is enabled (unmasked).
    pub const fn is_enabled(self, line: IrqLine) -> bool {
        !self.contains(Self::line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_past_the_slave_are_rejected() {
        assert_eq!(IrqLine::new(15).map(IrqLine::number), Ok(15));
        assert_eq!(IrqLine::new(16), Err(KernelError::InvalidIrqLine(16)));
    }

    #[test]
    fn slave_lines_map_onto_the_high_byte() {
        let rtc = IrqLine::new(8).unwrap();
        assert!(rtc.is_slave());
        assert_eq!(rtc.mask_bit(), 0);
        assert_eq!(IrqMask::line(rtc), IrqMask::RTC);
        assert!(!IrqLine::KEYBOARD.is_slave());
        assert_eq!(IrqLine::KEYBOARD.mask_bit(), 1);
    }

    #[test]
    fn port_bytes_round_into_the_mask() {
        let mask = IrqMask::from_ports(0xFD, 0xFF);
        assert!(mask.is_enabled(IrqLine::KEYBOARD));
        assert!(!mask.is_enabled(IrqLine::CASCADE));
        assert_eq!(mask.to_ports(), (0xFD, 0xFF));
        assert_eq!(IrqMask::all().difference(IrqMask::KEYBOARD), mask);
    }
}
