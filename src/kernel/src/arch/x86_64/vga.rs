//! VGA text mode driver for x86_64.
//!
//! Provides colored text output to the VGA text buffer at 0xB8000 and keeps
//! the blinking hardware cursor in step with the write position.

use super::crtc;
use super::port::X86Ports;
use crate::config::{SCREEN_COLUMNS as BUFFER_WIDTH, SCREEN_ROWS as BUFFER_HEIGHT};
use core::fmt;
use core::ptr;
use pauyos_hal::Console;
use spin::{Mutex, MutexGuard};
use x86_64::instructions::interrupts;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Columns between tab stops.
const TAB_WIDTH: usize = 4;

/// Glyph drawn for bytes outside printable ASCII.
const PLACEHOLDER: u8 = 0xfe;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
struct ColorCode(u8);

impl ColorCode {
    /// Creates a new color code from foreground and background colors.
    const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

/// A single character cell in the VGA buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// Global VGA writer instance.
pub static WRITER: spin::Once<Mutex<Writer>> = spin::Once::new();

/// Initializes the global VGA writer at the cursor the loader left behind.
///
/// Idempotent - safe to call multiple times.
pub fn init() {
    writer();
}

/// Returns a reference to the VGA writer, initializing if necessary.
pub fn writer() -> &'static Mutex<Writer> {
    WRITER.call_once(|| {
        let mut writer = Writer::new();
        writer.sync_from_hardware();
        Mutex::new(writer)
    })
}

/// Takes the writer even if the interrupted context holds it.
///
/// # Safety
///
/// Only for paths that never return to the interrupted code (fatal
/// exceptions, panics); the previous holder must never run again.
pub unsafe fn seize_writer() -> MutexGuard<'static, Writer> {
    let writer = writer();
    if writer.is_locked() {
        // SAFETY: the caller guarantees the owner is never resumed.
        unsafe { writer.force_unlock() };
    }
    writer.lock()
}

/// VGA text mode writer.
///
/// Manages cursor position and color state for writing to the VGA buffer.
pub struct Writer {
    /// Current column position (0 to BUFFER_WIDTH; BUFFER_WIDTH wraps on the next glyph).
    column_position: usize,
    /// Current row, or `-1` while parked above the first row.
    row_position: isize,
    /// Current color code for new characters.
    color_code: ColorCode,
    /// Pointer to the VGA buffer.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    buffer: *mut Buffer,
    /// CRT controller ports for the hardware cursor.
    crtc: X86Ports,
}

// SAFETY: Writer only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
// Access is synchronized through the WRITER spinlock.
unsafe impl Send for Writer {}

impl Writer {
    /// Creates a new VGA writer.
    fn new() -> Self {
        Writer {
            column_position: 0,
            row_position: 0,
            color_code: ColorCode::new(Color::White, Color::Black),
            // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text buffer
            // address on x86 systems. This memory is always present and mapped
            // when running on x86 hardware or in QEMU.
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
            // SAFETY: the writer only touches the CRTC index/data ports.
            crtc: unsafe { X86Ports::new() },
        }
    }

    /// Adopts the hardware cursor position as the write position.
    fn sync_from_hardware(&mut self) {
        let (column, row) = crtc::cursor_position(&mut self.crtc);
        self.column_position = column.min(BUFFER_WIDTH - 1);
        self.row_position = row.min(BUFFER_HEIGHT - 1) as isize;
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// Writes a single byte to the VGA buffer.
    ///
    /// Handles newlines, backspace, tabs and automatic line wrapping.
    /// Does not move the hardware cursor.
    fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            0x08 => self.backspace(),
            b'\t' => {
                self.put_glyph(b' ');
                while self.column_position % TAB_WIDTH != 0 {
                    self.put_glyph(b' ');
                }
            }
            0x20..=0x7e => self.put_glyph(byte),
            _ => self.put_glyph(PLACEHOLDER),
        }
    }

    fn put_glyph(&mut self, byte: u8) {
        // Check bounds BEFORE writing to prevent overflow
        if self.column_position >= BUFFER_WIDTH {
            self.new_line();
        }
        let row = self.current_row();
        let col = self.column_position;
        self.write_cell(row, col, byte);
        self.column_position += 1;
    }

    /// The row to draw on, leaving the parked state if needed.
    fn current_row(&mut self) -> usize {
        if self.row_position < 0 {
            self.row_position = 0;
        }
        self.row_position as usize
    }

    fn write_cell(&mut self, row: usize, col: usize, byte: u8) {
        debug_assert!(row < BUFFER_HEIGHT && col < BUFFER_WIDTH);
        // SAFETY: row and col are inside the buffer (checked above in debug
        // builds, guaranteed by every caller). The buffer pointer was validated
        // at construction time. Using volatile write because the VGA buffer
        // is memory-mapped I/O that may be read by hardware at any time.
        unsafe {
            ptr::write_volatile(
                &mut (*self.buffer).chars[row][col],
                ScreenChar {
                    ascii_character: byte,
                    color_code: self.color_code,
                },
            );
        }
    }

    /// Moves to the start of the next row, scrolling at the bottom.
    fn new_line(&mut self) {
        if self.row_position + 1 < BUFFER_HEIGHT as isize {
            self.row_position += 1;
        } else {
            self.scroll_up();
        }
        self.column_position = 0;
    }

    /// Steps back one cell, into the previous row if needed, and blanks it.
    fn backspace(&mut self) {
        if self.column_position > 0 {
            self.column_position -= 1;
        } else if self.row_position > 0 {
            self.row_position -= 1;
            self.column_position = BUFFER_WIDTH - 1;
        } else {
            return;
        }
        let row = self.current_row();
        let col = self.column_position.min(BUFFER_WIDTH - 1);
        self.write_cell(row, col, b' ');
    }

    /// Scrolls the screen up by one line.
    fn scroll_up(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                // SAFETY: row is in range [1, BUFFER_HEIGHT), col is in range [0, BUFFER_WIDTH).
                // row-1 is in range [0, BUFFER_HEIGHT-1). All indices are valid.
                // Using volatile operations because VGA buffer is memory-mapped I/O.
                unsafe {
                    let character = ptr::read_volatile(&(*self.buffer).chars[row][col]);
                    ptr::write_volatile(&mut (*self.buffer).chars[row - 1][col], character);
                }
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
    }

    /// Clears a single row by filling it with spaces.
    fn clear_row(&mut self, row: usize) {
        for col in 0..BUFFER_WIDTH {
            self.write_cell(row, col, b' ');
        }
    }

    /// Points the blinking cursor at the next write position.
    fn move_hardware_cursor(&mut self) {
        let row = self.row_position.max(0) as usize;
        crtc::set_cursor_position(&mut self.crtc, self.column_position, row);
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        self.move_hardware_cursor();
        Ok(())
    }
}

impl Console for Writer {
    fn put_char(&mut self, byte: u8) {
        self.write_byte(byte);
        self.move_hardware_cursor();
    }

    fn set_cursor_position(&mut self, x: i32, y: i32) {
        self.column_position = x.clamp(0, BUFFER_WIDTH as i32) as usize;
        self.row_position = if y < 0 {
            -1
        } else {
            y.min(BUFFER_HEIGHT as i32 - 1) as isize
        };
        self.move_hardware_cursor();
    }

    fn write_str(&mut self, s: &str) {
        let _ = <Self as fmt::Write>::write_str(self, s);
    }
}

/// Runs `f` on the writer with the keyboard interrupt held off.
pub fn with_writer<R>(f: impl FnOnce(&mut Writer) -> R) -> R {
    interrupts::without_interrupts(|| f(&mut writer().lock()))
}
