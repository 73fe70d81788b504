//! Support for the primary and secondary 8259 Programmable Interrupt Controllers (PICs).
//!
//! Out of reset the master PIC delivers IRQ 0..=7 on vectors 0x08..=0x0F,
//! which collide with CPU exceptions. [`ChainedPics::remap`] moves both
//! controllers to the range given by [`PIC_1_OFFSET`] and [`PIC_2_OFFSET`].

use pauyos_common::{IrqLine, IrqMask};
use pauyos_hal::{InterruptController, Port, PortIo};

/// The offset of the first PIC (master).
///
/// IRQs 0..7 are mapped to interrupts 32..39.
pub const PIC_1_OFFSET: u8 = 32;

/// The offset of the second PIC (slave).
///
/// IRQs 8..15 are mapped to interrupts 40..47.
pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

const PIC1_COMMAND: Port = Port::new(0x20);
const PIC1_DATA: Port = Port::new(0x21);
const PIC2_COMMAND: Port = Port::new(0xA0);
const PIC2_DATA: Port = Port::new(0xA1);

/// ICW1: begin initialization.
const ICW1_INIT: u8 = 0x10;
/// ICW1: an ICW4 will follow.
const ICW1_ICW4: u8 = 0x01;
/// ICW3 (master): a slave hangs off IRQ2.
const ICW3_SLAVE_ON_IRQ2: u8 = 1 << 2;
/// ICW3 (slave): cascade identity 2.
const ICW3_CASCADE_IDENTITY: u8 = 2;
/// ICW4: 8086/88 mode.
const ICW4_8086: u8 = 0x01;
/// OCW2: non-specific end of interrupt.
const END_OF_INTERRUPT: u8 = 0x20;

/// Possible IRQ indices.
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum InterruptIndex {
    /// Keyboard interrupt.
    Keyboard = PIC_1_OFFSET + 1,
}

impl InterruptIndex {
    /// Returns the internal u8 value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the internal usize value.
    pub fn as_usize(self) -> usize {
        usize::from(self as u8)
    }

    /// The hardware line raising this vector.
    pub fn line(self) -> IrqLine {
        match self {
            InterruptIndex::Keyboard => IrqLine::KEYBOARD,
        }
    }
}

/// A master/slave pair of 8259 controllers reached through `P`.
#[derive(Debug)]
pub struct ChainedPics<P> {
    io: P,
    master_offset: u8,
    slave_offset: u8,
}

impl<P> ChainedPics<P> {
    /// Wraps the controllers. Nothing is written until [`remap`](InterruptController::remap).
    pub const fn new(io: P) -> Self {
        Self {
            io,
            master_offset: PIC_1_OFFSET,
            slave_offset: PIC_2_OFFSET,
        }
    }

    /// Vector bases of the master and slave controller.
    pub fn offsets(&self) -> (u8, u8) {
        (self.master_offset, self.slave_offset)
    }

    /// Whether `vector` is delivered by one of the two controllers.
    pub fn handles_interrupt(&self, vector: u8) -> bool {
        let serves = |offset: u8| (offset..offset.saturating_add(8)).contains(&vector);
        serves(self.master_offset) || serves(self.slave_offset)
    }
}

impl<P: PortIo> ChainedPics<P> {
    /// Reads the current mask registers of both controllers.
    pub fn mask(&mut self) -> IrqMask {
        let master = self.io.read_byte(PIC1_DATA);
        let slave = self.io.read_byte(PIC2_DATA);
        IrqMask::from_ports(master, slave)
    }
}

impl<P: PortIo> InterruptController for ChainedPics<P> {
    /// Runs the four-word initialization handshake on both controllers.
    ///
    /// The writes must reach the hardware in exactly this order, so the
    /// caller has to keep interrupts disabled for the duration.
    fn remap(&mut self, master_offset: u8, slave_offset: u8) {
        let io = &mut self.io;

        io.write_byte(PIC1_COMMAND, ICW1_INIT | ICW1_ICW4);
        io.write_byte(PIC2_COMMAND, ICW1_INIT | ICW1_ICW4);

        io.write_byte(PIC1_DATA, master_offset);
        io.write_byte(PIC2_DATA, slave_offset);

        io.write_byte(PIC1_DATA, ICW3_SLAVE_ON_IRQ2);
        io.write_byte(PIC2_DATA, ICW3_CASCADE_IDENTITY);

        io.write_byte(PIC1_DATA, ICW4_8086);
        io.write_byte(PIC2_DATA, ICW4_8086);

        let (master, slave) = IrqMask::all().to_ports();
        io.write_byte(PIC1_DATA, master);
        io.write_byte(PIC2_DATA, slave);

        self.master_offset = master_offset;
        self.slave_offset = slave_offset;
    }

    /// Clears one mask bit. Slave lines also need [`IrqLine::CASCADE`] unmasked.
    fn unmask(&mut self, line: IrqLine) {
        let port = if line.is_slave() { PIC2_DATA } else { PIC1_DATA };
        let mask = self.io.read_byte(port) & !(1 << line.mask_bit());
        self.io.write_byte(port, mask);
    }

    fn end_of_interrupt(&mut self, line: IrqLine) {
        if line.is_slave() {
            self.io.write_byte(PIC2_COMMAND, END_OF_INTERRUPT);
        }
        self.io.write_byte(PIC1_COMMAND, END_OF_INTERRUPT);
    }
}
