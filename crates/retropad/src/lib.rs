//! Polling drivers for retro game controllers
//!
//! Samples exactly one controller variant and normalizes its native button
//! layout onto the shared 8-button [`ButtonMask`]:
//!
//! - [`DirectPinReader`] - eight independent active-low button lines
//! - [`ShiftRegisterReader`] - NES (8 bit) and SNES (12 bit) latch/clock pads
//! - [`SerialFrameReader`] - PlayStation-style attention/clock/command/data pads
//!
//! All readers implement [`ControllerReader`] and are driven through the
//! [`Controller`] facade, which is polled once per tick.
//!
//! ## Timing
//!
//! The protocols bit-bang the pins with busy-wait delays from an
//! [`embedded_hal::delay::DelayNs`] implementation. The windows in
//! [`protocol`] are minimums: the frame loops run inside a
//! [`critical_section`] so they cannot be stretched by an interrupt in the
//! middle of a bit.
//!
//! ## Example
//!
//! ```rust,ignore
//! use retropad::{Controller, ButtonMask, ShiftRegisterReader};
//!
//! let reader = ShiftRegisterReader::nes(clock_pin, latch_pin, data_pin, delay);
//! let mut controller = Controller::new(reader);
//! controller.init()?;
//!
//! loop {
//!     let buttons = controller.read()?;
//!     if buttons.contains(ButtonMask::START) {
//!         // ...
//!     }
//! }
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod button;
pub mod config;
pub mod controller;
pub mod direct;
pub mod error;
pub mod protocol;
pub mod reader;
pub mod serial;
pub mod shift_register;

pub use button::{ButtonMask, PsxButtons, SnesButtons};
pub use config::{Builder, Config, PinMap, PinRole, Variant};
pub use controller::{AnyReader, Controller};
pub use direct::DirectPinReader;
pub use error::{ConfigError, Error};
pub use reader::ControllerReader;
pub use serial::{RawFrame, SerialFrameReader};
pub use shift_register::{ShiftProtocol, ShiftRegisterReader};
