//! One GPIO line per button

use core::fmt::Debug;

use embedded_hal::digital::InputPin;

use crate::button::{BUTTON_COUNT, ButtonMask};
use crate::config::Variant;
use crate::error::Error;
use crate::reader::ControllerReader;

/// Reader for eight independent active-low button lines
///
/// The lines must already be configured as pulled-up inputs, so a
/// disconnected button reads as released. Line `i` maps to bit `i` of
/// [`ButtonMask`].
pub struct DirectPinReader<IN> {
    lines: [IN; BUTTON_COUNT],
}

impl<IN, PinErr> DirectPinReader<IN>
where
    IN: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Create a reader from lines in A, B, Select, Start, Up, Down, Left,
    /// Right order
    pub fn new(lines: [IN; BUTTON_COUNT]) -> Self {
        Self { lines }
    }

    /// Give the lines back
    pub fn release(self) -> [IN; BUTTON_COUNT] {
        self.lines
    }
}

impl<IN, PinErr> ControllerReader for DirectPinReader<IN>
where
    IN: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = Error<PinErr>;

    fn variant(&self) -> Variant {
        Variant::Gpio
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        log::debug!("GPIO controller ready on {BUTTON_COUNT} lines");
        Ok(())
    }

    fn read(&mut self) -> Result<ButtonMask, Self::Error> {
        let mut mask = ButtonMask::empty();
        for (bit, line) in self.lines.iter_mut().enumerate() {
            if line.is_low().map_err(Error::Pin)? {
                mask |= ButtonMask::from_bits_retain(1 << bit);
            }
        }
        Ok(mask)
    }
}
