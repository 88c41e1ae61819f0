//! Controller facade
//!
//! [`Controller`] wraps the single active [`ControllerReader`] and is what
//! game code polls once per tick. [`AnyReader`] lets startup code choose the
//! reader from a [`Config`](crate::config::Config) at runtime while keeping
//! one concrete controller type.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::ButtonMask;
use crate::config::Variant;
use crate::direct::DirectPinReader;
use crate::error::Error;
use crate::reader::ControllerReader;
use crate::serial::SerialFrameReader;
use crate::shift_register::ShiftRegisterReader;

/// Polling front end for one controller
pub struct Controller<R> {
    reader: R,
    initialized: bool,
}

impl<R> Controller<R>
where
    R: ControllerReader,
{
    /// Wrap a reader; nothing is touched until [`init`](Self::init)
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            initialized: false,
        }
    }

    /// Prepare the lines and prime the controller
    ///
    /// Runs the reader's initialization once; later calls do nothing.
    pub fn init(&mut self) -> Result<(), R::Error> {
        if self.initialized {
            return Ok(());
        }
        self.reader.init()?;
        self.initialized = true;
        log::info!("{} controller initialized", self.reader.variant());
        Ok(())
    }

    /// Poll the controller
    ///
    /// Initializes first if [`init`](Self::init) has not run yet.
    pub fn read(&mut self) -> Result<ButtonMask, R::Error> {
        self.init()?;
        self.reader.read()
    }

    /// Poll the controller and test one button
    ///
    /// Every call is a fresh poll, so checking several buttons this way can
    /// observe different physical states. Use [`read`](Self::read) once per
    /// tick to get a consistent snapshot.
    pub fn is_pressed(&mut self, button: ButtonMask) -> Result<bool, R::Error> {
        Ok(self.read()?.contains(button))
    }

    /// Hardware variant being polled
    pub fn variant(&self) -> Variant {
        self.reader.variant()
    }

    /// Access the reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Give the reader back
    pub fn release(self) -> R {
        self.reader
    }
}

/// Any of the readers, over one set of pin types
///
/// ## Type Parameters
///
/// * `IN` - Input pin type (buttons, data)
/// * `OUT` - Output pin type (clock, latch, attention, command)
/// * `D` - Busy-wait delay
pub enum AnyReader<IN, OUT, D> {
    /// GPIO buttons
    Direct(DirectPinReader<IN>),
    /// NES or SNES pad
    ShiftRegister(ShiftRegisterReader<OUT, IN, D>),
    /// PlayStation-style pad
    Serial(SerialFrameReader<OUT, IN, D>),
}

impl<IN, OUT, D> From<DirectPinReader<IN>> for AnyReader<IN, OUT, D> {
    fn from(reader: DirectPinReader<IN>) -> Self {
        AnyReader::Direct(reader)
    }
}

impl<IN, OUT, D> From<ShiftRegisterReader<OUT, IN, D>> for AnyReader<IN, OUT, D> {
    fn from(reader: ShiftRegisterReader<OUT, IN, D>) -> Self {
        AnyReader::ShiftRegister(reader)
    }
}

impl<IN, OUT, D> From<SerialFrameReader<OUT, IN, D>> for AnyReader<IN, OUT, D> {
    fn from(reader: SerialFrameReader<OUT, IN, D>) -> Self {
        AnyReader::Serial(reader)
    }
}

impl<IN, OUT, D, PinErr> ControllerReader for AnyReader<IN, OUT, D>
where
    IN: InputPin<Error = PinErr>,
    OUT: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = Error<PinErr>;

    fn variant(&self) -> Variant {
        match self {
            AnyReader::Direct(reader) => reader.variant(),
            AnyReader::ShiftRegister(reader) => reader.variant(),
            AnyReader::Serial(reader) => reader.variant(),
        }
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        match self {
            AnyReader::Direct(reader) => reader.init(),
            AnyReader::ShiftRegister(reader) => reader.init(),
            AnyReader::Serial(reader) => reader.init(),
        }
    }

    fn read(&mut self) -> Result<ButtonMask, Self::Error> {
        match self {
            AnyReader::Direct(reader) => reader.read(),
            AnyReader::ShiftRegister(reader) => reader.read(),
            AnyReader::Serial(reader) => reader.read(),
        }
    }
}
