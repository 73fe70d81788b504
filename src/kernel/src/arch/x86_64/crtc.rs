//! VGA CRT controller cursor registers.
//!
//! The hardware cursor is a linear cell index split across two registers
//! selected through the index port.

use crate::config::{SCREEN_COLUMNS, SCREEN_ROWS};
use pauyos_hal::{Port, PortIo};

const CRTC_INDEX: Port = Port::new(0x3D4);
const CRTC_DATA: Port = Port::new(0x3D5);

const CURSOR_LOCATION_HIGH: u8 = 0x0E;
const CURSOR_LOCATION_LOW: u8 = 0x0F;

/// Reads the hardware cursor as `(column, row)`.
pub fn cursor_position(io: &mut impl PortIo) -> (usize, usize) {
    io.write_byte(CRTC_INDEX, CURSOR_LOCATION_HIGH);
    let high = io.read_byte(CRTC_DATA);
    io.write_byte(CRTC_INDEX, CURSOR_LOCATION_LOW);
    let low = io.read_byte(CRTC_DATA);

    let cell = usize::from(u16::from_be_bytes([high, low]));
    (cell % SCREEN_COLUMNS, cell / SCREEN_COLUMNS)
}

/// Moves the hardware cursor; coordinates past the screen are clamped.
pub fn set_cursor_position(io: &mut impl PortIo, column: usize, row: usize) {
    let column = column.min(SCREEN_COLUMNS - 1);
    let row = row.min(SCREEN_ROWS - 1);
    // 80 * 25 fits in 16 bits.
    let [high, low] = ((row * SCREEN_COLUMNS + column) as u16).to_be_bytes();

    io.write_byte(CRTC_INDEX, CURSOR_LOCATION_LOW);
    io.write_byte(CRTC_DATA, low);
    io.write_byte(CRTC_INDEX, CURSOR_LOCATION_HIGH);
    io.write_byte(CRTC_DATA, high);
}
