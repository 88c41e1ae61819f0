//! NES and SNES shift register pads
//!
//! Both pads hold a parallel-in, serial-out shift register. A latch pulse
//! freezes the buttons into the register, then each clock pulse moves the
//! next bit onto the data line. Data is active low.
//!
//! ```text
//! latch  __/‾‾‾‾‾\______________________________________
//!           >=12us  >=6us
//! clock  ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\_____/‾‾‾‾‾\_____/‾‾‾‾‾ ...
//!                   ^      >=6us >=6us ^
//! data            sample bit 0        sample bit 1
//! ```

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::{ButtonMask, SnesButtons};
use crate::config::Variant;
use crate::error::{ConfigError, Error};
use crate::protocol::*;
use crate::reader::ControllerReader;

/// Frame layout of a shift register pad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftProtocol {
    /// 8 bits, one per button
    Nes,
    /// 12 bits, the upper four folded onto A and B
    Snes,
}

impl ShiftProtocol {
    /// Number of clock pulses per frame
    pub fn frame_bits(self) -> u8 {
        match self {
            ShiftProtocol::Nes => NES_FRAME_BITS,
            ShiftProtocol::Snes => SNES_FRAME_BITS,
        }
    }

    /// Map a sampled frame (bit set = pressed) onto the 8-button set
    pub fn remap(self, sampled: u16) -> ButtonMask {
        match self {
            ShiftProtocol::Nes => ButtonMask::from_nes(sampled as u8),
            ShiftProtocol::Snes => ButtonMask::from_snes(SnesButtons::from_bits_truncate(sampled)),
        }
    }
}

impl TryFrom<Variant> for ShiftProtocol {
    type Error = ConfigError;

    fn try_from(variant: Variant) -> Result<Self, Self::Error> {
        match variant {
            Variant::Nes => Ok(ShiftProtocol::Nes),
            Variant::Snes => Ok(ShiftProtocol::Snes),
            Variant::Gpio | Variant::Psx => Err(ConfigError::PinMapMismatch { variant }),
        }
    }
}

/// Reader for NES and SNES pads
///
/// ## Type Parameters
///
/// * `OUT` - Clock and latch pins implementing [`OutputPin`]
/// * `IN` - Data pin implementing [`InputPin`]
/// * `D` - Busy-wait delay implementing [`DelayNs`]
pub struct ShiftRegisterReader<OUT, IN, D> {
    protocol: ShiftProtocol,
    clock: OUT,
    latch: OUT,
    data: IN,
    delay: D,
}

impl<OUT, IN, D, PinErr> ShiftRegisterReader<OUT, IN, D>
where
    OUT: OutputPin<Error = PinErr>,
    IN: InputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    /// Create a reader for the given frame layout
    pub fn new(protocol: ShiftProtocol, clock: OUT, latch: OUT, data: IN, delay: D) -> Self {
        Self {
            protocol,
            clock,
            latch,
            data,
            delay,
        }
    }

    /// Create a reader for an NES pad
    pub fn nes(clock: OUT, latch: OUT, data: IN, delay: D) -> Self {
        Self::new(ShiftProtocol::Nes, clock, latch, data, delay)
    }

    /// Create a reader for an SNES pad
    pub fn snes(clock: OUT, latch: OUT, data: IN, delay: D) -> Self {
        Self::new(ShiftProtocol::Snes, clock, latch, data, delay)
    }

    /// Frame layout this reader samples
    pub fn protocol(&self) -> ShiftProtocol {
        self.protocol
    }

    /// Latch the pad and clock out one frame, bit set = line read low
    ///
    /// Bit 0 is the first bit on the data line.
    pub fn sample(&mut self) -> Result<u16, Error<PinErr>> {
        critical_section::with(|_| self.sample_frame())
    }

    fn sample_frame(&mut self) -> Result<u16, Error<PinErr>> {
        self.latch.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(LATCH_PULSE_US);
        self.latch.set_low().map_err(Error::Pin)?;
        self.delay.delay_us(LATCH_SETTLE_US);

        let mut sampled = 0u16;
        for bit in 0..self.protocol.frame_bits() {
            if self.data.is_low().map_err(Error::Pin)? {
                sampled |= 1 << bit;
            }
            self.clock.set_low().map_err(Error::Pin)?;
            self.delay.delay_us(CLOCK_HALF_PERIOD_US);
            self.clock.set_high().map_err(Error::Pin)?;
            self.delay.delay_us(CLOCK_HALF_PERIOD_US);
        }

        Ok(sampled)
    }

    /// Give the pins and delay back
    pub fn release(self) -> (OUT, OUT, IN, D) {
        (self.clock, self.latch, self.data, self.delay)
    }
}

impl<OUT, IN, D, PinErr> ControllerReader for ShiftRegisterReader<OUT, IN, D>
where
    OUT: OutputPin<Error = PinErr>,
    IN: InputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = Error<PinErr>;

    fn variant(&self) -> Variant {
        match self.protocol {
            ShiftProtocol::Nes => Variant::Nes,
            ShiftProtocol::Snes => Variant::Snes,
        }
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        // Idle: latch low, clock high
        self.latch.set_low().map_err(Error::Pin)?;
        self.clock.set_high().map_err(Error::Pin)?;
        log::debug!(
            "{:?} shift register ready, {} bits per frame",
            self.protocol,
            self.protocol.frame_bits()
        );
        Ok(())
    }

    fn read(&mut self) -> Result<ButtonMask, Self::Error> {
        let sampled = self.sample()?;
        log::trace!("{:?} frame {:#05x}", self.protocol, sampled);
        Ok(self.protocol.remap(sampled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bits() {
        assert_eq!(ShiftProtocol::Nes.frame_bits(), 8);
        assert_eq!(ShiftProtocol::Snes.frame_bits(), 12);
    }

    #[test]
    fn test_nes_remap_ignores_nothing_in_low_byte() {
        assert_eq!(ShiftProtocol::Nes.remap(0x00A5).bits(), 0xA5);
    }

    #[test]
    fn test_snes_remap_folds_upper_bits() {
        // R (bit 11) only
        assert_eq!(ShiftProtocol::Snes.remap(1 << 11), ButtonMask::A);
        // L (bit 10) with Start
        assert_eq!(
            ShiftProtocol::Snes.remap((1 << 10) | (1 << 3)),
            ButtonMask::B | ButtonMask::START
        );
    }

    #[test]
    fn test_protocol_from_variant() {
        assert_eq!(ShiftProtocol::try_from(Variant::Nes), Ok(ShiftProtocol::Nes));
        assert_eq!(ShiftProtocol::try_from(Variant::Snes), Ok(ShiftProtocol::Snes));
        for variant in [Variant::Gpio, Variant::Psx] {
            assert_eq!(
                ShiftProtocol::try_from(variant),
                Err(ConfigError::PinMapMismatch { variant })
            );
        }
    }
}
