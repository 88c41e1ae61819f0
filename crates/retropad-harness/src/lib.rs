//! Host-side simulated controller bus for protocol tests.
//!
//! A [`SimBus`] couples one simulated [`Device`] with a virtual clock. Pins
//! and delays handed out by the bus implement the embedded-hal traits, so the
//! real readers run against them unchanged. Every drive and sample is traced
//! with its virtual timestamp for timing assertions. A line can be set to fail
//! after a number of drives to exercise the readers' error paths.

pub mod devices;

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use retropad::{
    AnyReader, Config, ConfigError, DirectPinReader, PinMap, SerialFrameReader, ShiftProtocol,
    ShiftRegisterReader,
};

/// Protocol role of a simulated line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    Clock,
    Latch,
    Attention,
    Command,
    Data,
    /// Direct button line, in `ButtonMask` bit order
    Button(usize),
}

/// Something a reader did to the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Output pin driven
    Drive { at_ns: u64, line: Line, high: bool },
    /// Input pin sampled
    Sense { at_ns: u64, line: Line, high: bool },
}

/// Injected pin failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimPinError {
    /// Line whose drive failed
    pub line: Line,
}

impl digital::Error for SimPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Simulated hardware on the other end of the lines
pub trait Device {
    /// React to an output level
    fn drive(&mut self, line: Line, high: bool);

    /// Electrical level of an input, `true` = high
    fn sense(&mut self, line: Line) -> bool;
}

struct Bench<D> {
    device: D,
    now_ns: u64,
    trace: Vec<Event>,
    /// Line and number of drives it still accepts
    fault: Option<(Line, usize)>,
}

/// Shared simulated bus
pub struct SimBus<D> {
    bench: Rc<RefCell<Bench<D>>>,
}

impl<D> Clone for SimBus<D> {
    fn clone(&self) -> Self {
        Self {
            bench: Rc::clone(&self.bench),
        }
    }
}

impl<D: Device> SimBus<D> {
    /// Construct a bus around a device, clock at zero.
    pub fn new(device: D) -> Self {
        Self {
            bench: Rc::new(RefCell::new(Bench {
                device,
                now_ns: 0,
                trace: Vec::new(),
                fault: None,
            })),
        }
    }

    /// Output pin for a line.
    pub fn output(&self, line: Line) -> SimOutput<D> {
        SimOutput {
            bus: self.clone(),
            line,
        }
    }

    /// Input pin for a line.
    pub fn input(&self, line: Line) -> SimInput<D> {
        SimInput {
            bus: self.clone(),
            line,
        }
    }

    /// Delay that advances the virtual clock.
    pub fn delay(&self) -> SimDelay<D> {
        SimDelay { bus: self.clone() }
    }

    /// Reader for eight direct button lines.
    pub fn direct_reader(&self) -> DirectPinReader<SimInput<D>> {
        DirectPinReader::new(std::array::from_fn(|i| self.input(Line::Button(i))))
    }

    /// NES or SNES reader on the clock, latch and data lines.
    pub fn shift_register_reader(
        &self,
        protocol: ShiftProtocol,
    ) -> ShiftRegisterReader<SimOutput<D>, SimInput<D>, SimDelay<D>> {
        ShiftRegisterReader::new(
            protocol,
            self.output(Line::Clock),
            self.output(Line::Latch),
            self.input(Line::Data),
            self.delay(),
        )
    }

    /// PlayStation reader on the attention, clock, command and data lines.
    pub fn serial_reader(&self) -> SerialFrameReader<SimOutput<D>, SimInput<D>, SimDelay<D>> {
        SerialFrameReader::new(
            self.output(Line::Attention),
            self.output(Line::Clock),
            self.output(Line::Command),
            self.input(Line::Data),
            self.delay(),
        )
    }

    /// Build whichever reader a configuration selects, the way firmware does.
    pub fn reader_for(
        &self,
        config: &Config,
    ) -> Result<AnyReader<SimInput<D>, SimOutput<D>, SimDelay<D>>, ConfigError> {
        config.check()?;
        let reader = match config.pins {
            PinMap::Gpio(_) => self.direct_reader().into(),
            PinMap::ShiftRegister { .. } => {
                let protocol = ShiftProtocol::try_from(config.variant)?;
                self.shift_register_reader(protocol).into()
            }
            PinMap::Serial { .. } => self.serial_reader().into(),
        };
        Ok(reader)
    }

    /// Let `line` accept `drives` more drives, then fail every one after.
    ///
    /// Failed drives reach neither the device nor the trace.
    pub fn fail_after(&self, line: Line, drives: usize) {
        self.bench.borrow_mut().fault = Some((line, drives));
    }

    /// Current virtual time.
    pub fn now_ns(&self) -> u64 {
        self.bench.borrow().now_ns
    }

    /// Snapshot of everything traced so far.
    pub fn trace(&self) -> Vec<Event> {
        self.bench.borrow().trace.clone()
    }

    /// Forget the trace, e.g. after initialization.
    pub fn clear_trace(&self) {
        self.bench.borrow_mut().trace.clear();
    }

    /// Levels driven on a line, with timestamps.
    pub fn drives(&self, line: Line) -> Vec<(u64, bool)> {
        self.bench
            .borrow()
            .trace
            .iter()
            .filter_map(|event| match *event {
                Event::Drive {
                    at_ns,
                    line: l,
                    high,
                } if l == line => Some((at_ns, high)),
                _ => None,
            })
            .collect()
    }

    /// Samples taken on a line, with timestamps.
    pub fn senses(&self, line: Line) -> Vec<(u64, bool)> {
        self.bench
            .borrow()
            .trace
            .iter()
            .filter_map(|event| match *event {
                Event::Sense {
                    at_ns,
                    line: l,
                    high,
                } if l == line => Some((at_ns, high)),
                _ => None,
            })
            .collect()
    }

    /// Durations of every completed phase at `high` on a driven line.
    ///
    /// Repeated drives at the same level do not end a phase.
    pub fn phase_widths(&self, line: Line, high: bool) -> Vec<u64> {
        let mut widths = Vec::new();
        let mut current: Option<(u64, bool)> = None;

        for (at_ns, level) in self.drives(line) {
            match current {
                Some((_, prev)) if prev == level => {}
                Some((since, prev)) => {
                    if prev == high {
                        widths.push(at_ns - since);
                    }
                    current = Some((at_ns, level));
                }
                None => current = Some((at_ns, level)),
            }
        }

        widths
    }

    /// Timestamps where a driven line changed to `high`.
    pub fn transitions(&self, line: Line, high: bool) -> Vec<u64> {
        let mut edges = Vec::new();
        let mut prev: Option<bool> = None;

        for (at_ns, level) in self.drives(line) {
            if level == high && prev.is_some_and(|p| p != level) {
                edges.push(at_ns);
            }
            prev = Some(level);
        }

        edges
    }

    /// Run a closure against the simulated device.
    pub fn with_device<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.bench.borrow_mut().device)
    }

    fn drive(&self, line: Line, high: bool) -> Result<(), SimPinError> {
        let mut bench = self.bench.borrow_mut();
        if let Some((faulty, remaining)) = bench.fault.as_mut() {
            if *faulty == line {
                if *remaining == 0 {
                    return Err(SimPinError { line });
                }
                *remaining -= 1;
            }
        }
        let at_ns = bench.now_ns;
        bench.trace.push(Event::Drive { at_ns, line, high });
        bench.device.drive(line, high);
        Ok(())
    }

    fn sense(&self, line: Line) -> bool {
        let mut bench = self.bench.borrow_mut();
        let at_ns = bench.now_ns;
        let high = bench.device.sense(line);
        bench.trace.push(Event::Sense { at_ns, line, high });
        high
    }
}

/// Simulated output pin
pub struct SimOutput<D> {
    bus: SimBus<D>,
    line: Line,
}

impl<D> ErrorType for SimOutput<D> {
    type Error = SimPinError;
}

impl<D: Device> OutputPin for SimOutput<D> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.drive(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.drive(self.line, true)
    }
}

/// Simulated input pin
pub struct SimInput<D> {
    bus: SimBus<D>,
    line: Line,
}

impl<D> ErrorType for SimInput<D> {
    type Error = SimPinError;
}

impl<D: Device> InputPin for SimInput<D> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.bus.sense(self.line))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.bus.sense(self.line))
    }
}

/// Delay that advances the bus clock instead of sleeping
pub struct SimDelay<D> {
    bus: SimBus<D>,
}

impl<D> DelayNs for SimDelay<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.bench.borrow_mut().now_ns += u64::from(ns);
    }
}
