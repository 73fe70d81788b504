//! Interrupt Descriptor Table (IDT), exception handlers and the keyboard IRQ.

use crate::arch::x86_64::pic::{ChainedPics, InterruptIndex};
use crate::arch::x86_64::port::X86Ports;
use crate::arch::x86_64::{fatal, report, vga, Cpu};
use crate::terminal::Terminal;
use lazy_static::lazy_static;
use spin::Mutex;
use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame, PageFaultErrorCode};

/// The chained 8259 controllers.
///
/// Locked from the boot path only while interrupts are still disabled, and
/// from the keyboard handler afterwards.
// SAFETY: the PICs are only ever driven through this one handle.
pub static PICS: Mutex<ChainedPics<X86Ports>> =
    Mutex::new(ChainedPics::new(unsafe { X86Ports::new() }));

/// Console input state, owned by the keyboard handler for the kernel's lifetime.
static TERMINAL: Mutex<Terminal> = Mutex::new(Terminal::new());

lazy_static! {
    /// The Interrupt Descriptor Table (IDT).
    static ref IDT: InterruptDescriptorTable = {
        let mut idt = InterruptDescriptorTable::new();
        idt.breakpoint.set_handler_fn(breakpoint_handler);
        idt.double_fault.set_handler_fn(double_fault_handler);
        idt.page_fault.set_handler_fn(page_fault_handler);
        idt.general_protection_fault.set_handler_fn(general_protection_fault_handler);
        idt.divide_error.set_handler_fn(divide_error_handler);
        idt.invalid_opcode.set_handler_fn(invalid_opcode_handler);

        // Hardware interrupts
        idt[InterruptIndex::Keyboard.as_usize()]
            .set_handler_fn(keyboard_interrupt_handler);

        idt
    };
}

/// Loads the IDT. Hardware interrupts stay disabled.
pub fn init_idt() {
    IDT.load();
}

/// Handler for the keyboard interrupt.
///
/// Runs with interrupts disabled (interrupt gate), so the locks below are
/// never contended by a nested keyboard interrupt.
extern "x86-interrupt" fn keyboard_interrupt_handler(_stack_frame: InterruptStackFrame) {
    // SAFETY: the terminal only reads the PS/2 data port through this handle.
    let mut ports = unsafe { X86Ports::new() };
    let mut pics = PICS.lock();
    let mut writer = vga::writer().lock();
    TERMINAL
        .lock()
        .service_interrupt(&mut ports, &mut *pics, &mut *writer, &mut Cpu);
}

/// Handler for the breakpoint exception (INT3).
extern "x86-interrupt" fn breakpoint_handler(stack_frame: InterruptStackFrame) {
    report(format_args!("EXCEPTION: BREAKPOINT\n{:#?}\n", stack_frame));
}

/// Handler for the double fault exception.
extern "x86-interrupt" fn double_fault_handler(
    stack_frame: InterruptStackFrame,
    _error_code: u64,
) -> ! {
    fatal(format_args!("EXCEPTION: DOUBLE FAULT\n{:#?}\n", stack_frame))
}

/// Handler for the page fault exception.
extern "x86-interrupt" fn page_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: PageFaultErrorCode,
) {
    use x86_64::registers::control::Cr2;

    fatal(format_args!(
        "EXCEPTION: PAGE FAULT\nAccessed Address: {:?}\nError Code: {:?}\n{:#?}\n",
        Cr2::read(),
        error_code,
        stack_frame
    ))
}

/// Handler for the general protection fault exception.
extern "x86-interrupt" fn general_protection_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: u64,
) {
    fatal(format_args!(
        "EXCEPTION: GENERAL PROTECTION FAULT\nError Code: {:#x}\n{:#?}\n",
        error_code, stack_frame
    ))
}

/// Handler for the divide error exception. The `crash` command lands here.
extern "x86-interrupt" fn divide_error_handler(stack_frame: InterruptStackFrame) {
    fatal(format_args!("EXCEPTION: DIVIDE ERROR\n{:#?}\n", stack_frame))
}

/// Handler for the invalid opcode exception.
extern "x86-interrupt" fn invalid_opcode_handler(stack_frame: InterruptStackFrame) {
    fatal(format_args!("EXCEPTION: INVALID OPCODE\n{:#?}\n", stack_frame))
}
