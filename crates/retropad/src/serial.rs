//! PlayStation-style serial pads
//!
//! A synchronous, full-duplex, LSB-first byte exchange over four lines:
//!
//! - **ATT**: attention/select, active low, held for the whole frame
//! - **CLK**: bit clock, idle high, data sampled on the rising edge
//! - **CMD**: command from the host
//! - **DAT**: data from the pad, active low
//!
//! One poll is a five byte frame:
//!
//! | byte | command | pad answers |
//! |------|---------|-------------|
//! | 0 | `0x01` frame start | idle |
//! | 1 | `0x42` poll | mode (`0x41` digital) |
//! | 2 | `0xFF` | `0x5A` |
//! | 3 | `0xFF` | buttons, low byte |
//! | 4 | `0xFF` | buttons, high byte |
//!
//! The header answers are kept in [`RawFrame`] but never checked, and there
//! is no checksum. A missing pad leaves DAT floating high, which reads as no
//! buttons pressed.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::button::{ButtonMask, PsxButtons};
use crate::config::Variant;
use crate::error::Error;
use crate::protocol::*;
use crate::reader::ControllerReader;

/// Bytes received during one poll
///
/// Values are as sampled: a bit is set when DAT read low.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Answers to the frame start, poll and pad header bytes
    pub header: [u8; 3],
    /// Digital button field, low byte first
    pub payload: [u8; 2],
}

impl RawFrame {
    /// Button field, bit set = pressed
    pub fn buttons(&self) -> PsxButtons {
        PsxButtons::from_bits_retain(u16::from_le_bytes(self.payload))
    }
}

/// Reader for PlayStation-style digital pads
///
/// ## Type Parameters
///
/// * `OUT` - Attention, clock and command pins implementing [`OutputPin`]
/// * `IN` - Data pin implementing [`InputPin`], pulled up
/// * `D` - Busy-wait delay implementing [`DelayNs`]
pub struct SerialFrameReader<OUT, IN, D> {
    attention: OUT,
    clock: OUT,
    command: OUT,
    data: IN,
    delay: D,
    last_frame: RawFrame,
}

impl<OUT, IN, D, PinErr> SerialFrameReader<OUT, IN, D>
where
    OUT: OutputPin<Error = PinErr>,
    IN: InputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    /// Create a new reader
    ///
    /// # Arguments
    ///
    /// * `attention` - ATT (output, active low)
    /// * `clock` - CLK (output, idle high)
    /// * `command` - CMD (output)
    /// * `data` - DAT (input, pulled up)
    /// * `delay` - busy-wait delay for bit timing
    pub fn new(attention: OUT, clock: OUT, command: OUT, data: IN, delay: D) -> Self {
        Self {
            attention,
            clock,
            command,
            data,
            delay,
            last_frame: RawFrame::default(),
        }
    }

    /// Exchange one byte, LSB first
    ///
    /// Drives `command` onto CMD while sampling DAT, returning the received
    /// byte with a bit set for every low sample. Attention is left as is.
    pub fn transfer_byte(&mut self, command: u8) -> Result<u8, Error<PinErr>> {
        let mut received = 0u8;
        for bit in 0..8 {
            let level = PinState::from((command >> bit) & 1 != 0);
            self.command.set_state(level).map_err(Error::Pin)?;

            self.clock.set_low().map_err(Error::Pin)?;
            self.clock.set_high().map_err(Error::Pin)?;
            if self.data.is_low().map_err(Error::Pin)? {
                received |= 1 << bit;
            }
            self.delay.delay_us(BIT_HOLD_US);
        }
        Ok(received)
    }

    /// Frame received by the most recent poll
    pub fn last_frame(&self) -> RawFrame {
        self.last_frame
    }

    /// Run one poll frame and return what was received
    pub fn exchange(&mut self) -> Result<RawFrame, Error<PinErr>> {
        let frame = critical_section::with(|_| {
            self.delay.delay_us(ATTENTION_SETUP_US);
            self.with_attention(Self::transfer_frame)
        })?;

        log::trace!(
            "frame header {:02x?} payload {:02x?}",
            frame.header,
            frame.payload
        );
        self.last_frame = frame;
        Ok(frame)
    }

    /// Assert attention around `f`, releasing it even if `f` fails
    fn with_attention<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error<PinErr>>,
    ) -> Result<T, Error<PinErr>> {
        self.attention.set_low().map_err(Error::Pin)?;
        let result = f(self);
        let released = self.attention.set_high().map_err(Error::Pin);
        let value = result?;
        released.map(|()| value)
    }

    fn transfer_frame(&mut self) -> Result<RawFrame, Error<PinErr>> {
        let mut frame = RawFrame::default();
        for (slot, command) in frame.header.iter_mut().zip(FRAME_HEADER) {
            *slot = self.transfer_byte(command)?;
        }
        for slot in frame.payload.iter_mut() {
            *slot = self.transfer_byte(PAD_BYTE)?;
        }
        Ok(frame)
    }

    /// Give the pins and delay back
    pub fn release(self) -> (OUT, OUT, OUT, IN, D) {
        (
            self.attention,
            self.clock,
            self.command,
            self.data,
            self.delay,
        )
    }
}

impl<OUT, IN, D, PinErr> ControllerReader for SerialFrameReader<OUT, IN, D>
where
    OUT: OutputPin<Error = PinErr>,
    IN: InputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = Error<PinErr>;

    fn variant(&self) -> Variant {
        Variant::Psx
    }

    /// Idle the bus and send two dummy frames to flush stale pad state
    fn init(&mut self) -> Result<(), Self::Error> {
        self.attention.set_high().map_err(Error::Pin)?;
        self.clock.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(IDLE_SETTLE_US);

        for _ in 0..PRIMING_FRAMES {
            critical_section::with(|_| {
                self.with_attention(|reader| {
                    reader.delay.delay_us(PRIMING_SELECT_US);
                    reader.transfer_byte(PRIMING_BYTE)?;
                    reader.delay.delay_us(PRIMING_SELECT_US);
                    Ok(())
                })
            })?;
            self.delay.delay_us(PRIMING_RELEASE_US);
        }

        log::debug!("PlayStation controller primed");
        Ok(())
    }

    fn read(&mut self) -> Result<ButtonMask, Self::Error> {
        let frame = self.exchange()?;
        Ok(ButtonMask::from_psx(frame.buttons()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_frame_payload_is_little_endian() {
        let frame = RawFrame {
            header: [0x00, 0xBE, 0xA5],
            payload: [0x08, 0x40],
        };
        assert_eq!(frame.buttons(), PsxButtons::START | PsxButtons::CROSS);
    }

    #[test]
    fn test_empty_frame_has_no_buttons() {
        assert!(RawFrame::default().buttons().is_empty());
    }
}
