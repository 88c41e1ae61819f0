//! Reader abstraction
//!
//! This module provides the [`ControllerReader`] trait, implemented once per
//! controller protocol:
//!
//! - [`DirectPinReader`](crate::direct::DirectPinReader) - GPIO buttons
//! - [`ShiftRegisterReader`](crate::shift_register::ShiftRegisterReader) - NES / SNES
//! - [`SerialFrameReader`](crate::serial::SerialFrameReader) - PlayStation-style
//!
//! A reader owns every pin its protocol uses for the lifetime of the
//! program, plus whatever delay source it needs for bit timing.

use core::fmt::Debug;

use crate::button::ButtonMask;
use crate::config::Variant;

/// Trait for a single-controller polling protocol
///
/// This trait lets the [`Controller`](crate::controller::Controller) facade
/// poll any variant without knowing its wire protocol.
///
/// ## Implementing
///
/// `read()` must recompute the mask from the signal lines on every call.
/// No pressed state may be carried between polls.
pub trait ControllerReader {
    /// Error type for pin operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Hardware variant this reader speaks to
    fn variant(&self) -> Variant;

    /// Put the lines into their idle state and prime the controller
    ///
    /// Must complete before the first call to [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Run one full protocol exchange and return the normalized buttons
    ///
    /// Blocks for the whole exchange. An absent controller is not reported;
    /// it reads as whatever the idle lines produce.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn read(&mut self) -> Result<ButtonMask, Self::Error>;
}
