//! Test doubles for the hardware traits.
//!
//! Each fake records what the code under test did to it, so assertions can
//! be made on exact port sequences and on-screen output.

use core::fmt;
use pauyos_common::IrqLine;
use pauyos_hal::{Console, InterruptController, Port, PortIo, Processor};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::sync::Once;

/// Anything a fake saw, in the order it happened across all fakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PortRead(u16),
    PortWrite(u16, u8),
    EndOfInterrupt(IrqLine),
    Char(u8),
    Cursor(i32, i32),
    Halt,
    Fault,
}

/// Event log shared by several fakes.
#[derive(Debug, Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Index of the first event matching `wanted`.
    pub fn first(&self, wanted: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(wanted)
    }

    /// Index of the last event matching `wanted`.
    pub fn last(&self, wanted: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().rposition(wanted)
    }
}

fn note(timeline: &Option<Timeline>, event: Event) {
    if let Some(timeline) = timeline {
        timeline.record(event);
    }
}

thread_local! {
    static CAPTURED_LOGS: RefCell<Option<String>> = RefCell::new(None);
}

static INSTALL_LOGGER: Once = Once::new();

/// Installs the kernel logger once for the whole test binary, at full verbosity.
pub fn install_logger() {
    INSTALL_LOGGER.call_once(|| {
        let _ = crate::logger::init();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Runs `f` and returns every record it logged on this thread.
pub fn capture_logs(f: impl FnOnce()) -> String {
    install_logger();
    CAPTURED_LOGS.with(|captured| *captured.borrow_mut() = Some(String::new()));
    f();
    CAPTURED_LOGS.with(|captured| captured.borrow_mut().take().unwrap_or_default())
}

/// Log sink for test builds; drops records outside [`capture_logs`].
pub fn capture_record(render: impl FnOnce(&mut dyn fmt::Write) -> fmt::Result) {
    CAPTURED_LOGS.with(|captured| {
        if let Some(buffer) = captured.borrow_mut().as_mut() {
            let _ = render(buffer);
        }
    });
}

/// One observed port access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortAccess {
    Read(u16),
    Write(u16, u8),
}

/// Port space that latches written values and replays scripted reads.
#[derive(Debug, Default)]
pub struct FakePorts {
    pub log: Vec<PortAccess>,
    scripted: BTreeMap<u16, VecDeque<u8>>,
    latched: BTreeMap<u16, u8>,
    timeline: Option<Timeline>,
}

impl FakePorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also records every access on `timeline`.
    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }

    /// Queues values returned by the next reads of `port`, oldest first.
    pub fn script(&mut self, port: u16, values: &[u8]) {
        self.scripted
            .entry(port)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Every write, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                PortAccess::Write(port, value) => Some((port, value)),
                PortAccess::Read(_) => None,
            })
            .collect()
    }
}

impl PortIo for FakePorts {
    fn read_byte(&mut self, port: Port) -> u8 {
        let port = port.number();
        self.log.push(PortAccess::Read(port));
        note(&self.timeline, Event::PortRead(port));
        self.scripted
            .get_mut(&port)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.latched.get(&port).copied())
            .unwrap_or(0)
    }

    fn write_byte(&mut self, port: Port, value: u8) {
        let port = port.number();
        self.log.push(PortAccess::Write(port, value));
        note(&self.timeline, Event::PortWrite(port, value));
        self.latched.insert(port, value);
    }
}

/// Console that keeps everything written to it.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    pub output: String,
    pub cursor_moves: Vec<(i32, i32)>,
    timeline: Option<Timeline>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }
}

impl Console for RecordingConsole {
    fn put_char(&mut self, byte: u8) {
        self.output.push(char::from(byte));
        note(&self.timeline, Event::Char(byte));
    }

    fn set_cursor_position(&mut self, x: i32, y: i32) {
        self.cursor_moves.push((x, y));
        note(&self.timeline, Event::Cursor(x, y));
    }
}

/// Interrupt controller that only records calls.
#[derive(Debug, Default)]
pub struct FakePic {
    pub remaps: Vec<(u8, u8)>,
    pub unmasked: Vec<IrqLine>,
    pub acknowledged: Vec<IrqLine>,
    timeline: Option<Timeline>,
}

impl FakePic {
    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }
}

impl InterruptController for FakePic {
    fn remap(&mut self, master_offset: u8, slave_offset: u8) {
        self.remaps.push((master_offset, slave_offset));
    }

    fn unmask(&mut self, line: IrqLine) {
        self.unmasked.push(line);
    }

    fn end_of_interrupt(&mut self, line: IrqLine) {
        self.acknowledged.push(line);
        note(&self.timeline, Event::EndOfInterrupt(line));
    }
}

/// Processor whose terminal states return immediately.
#[derive(Debug, Default)]
pub struct FakeCpu {
    pub halts: usize,
    pub faults: usize,
    timeline: Option<Timeline>,
}

impl FakeCpu {
    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }
}

impl Processor for FakeCpu {
    fn halt(&mut self) {
        self.halts += 1;
        note(&self.timeline, Event::Halt);
    }

    fn raise_fault(&mut self) {
        self.faults += 1;
        note(&self.timeline, Event::Fault);
    }
}
