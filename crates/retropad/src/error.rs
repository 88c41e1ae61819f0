//! Error types for the driver
//!
//! This module defines error types for configuration building ([`ConfigError`])
//! and controller polling ([`Error`]).
//!
//! ## Error Types
//!
//! - [`ConfigError`] - Fatal errors while building the pin configuration,
//!   raised before any pin is touched
//! - [`Error`] - Pin errors reported by the HAL while polling
//!
//! A controller that does not answer (unplugged, noisy cable) is not an
//! error: the protocols carry no checksum, so the reader returns whatever the
//! lines produced, which in practice is "no buttons pressed".
//!
//! ## Example
//!
//! ```
//! use retropad::{Builder, ConfigError, PinRole, Variant};
//!
//! // Missing variant
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(ConfigError::MissingVariant)));
//!
//! // NES pad without a data line
//! let result = Builder::new().variant(Variant::Nes).clock(2).latch(3).build();
//! assert!(matches!(
//!     result,
//!     Err(ConfigError::MissingPin { role: PinRole::Data })
//! ));
//! ```

use core::fmt::Debug;

use crate::config::{PinRole, Variant};

/// Errors that can occur while polling a controller
///
/// Generic over the pin error type to preserve the specific HAL error.
#[derive(Debug)]
pub enum Error<E> {
    /// GPIO pin error
    ///
    /// Wraps the error returned by the underlying `InputPin`/`OutputPin`.
    Pin(E),
}

impl<E: Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
///
/// These are fatal: firmware is expected to halt rather than poll with a
/// half-configured reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No controller variant was selected
    ///
    /// [`Builder::variant()`](crate::config::Builder::variant) must be called before building.
    MissingVariant,
    /// A pin role required by the variant was not bound
    MissingPin {
        /// Role left unbound
        role: PinRole,
    },
    /// A pin role was bound that the variant does not use
    UnexpectedPin {
        /// Variant being configured
        variant: Variant,
        /// Role that has no meaning for the variant
        role: PinRole,
    },
    /// The same physical line was bound to two roles
    DuplicatePin {
        /// Line identifier
        pin: u8,
    },
    /// The pin map does not belong to the selected variant
    PinMapMismatch {
        /// Variant the configuration names
        variant: Variant,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingVariant => write!(f, "No controller variant selected"),
            ConfigError::MissingPin { role } => write!(f, "Pin for {role} must be specified"),
            ConfigError::UnexpectedPin { variant, role } => {
                write!(f, "{variant} controllers have no {role} pin")
            }
            ConfigError::DuplicatePin { pin } => {
                write!(f, "Pin {pin} is bound to more than one role")
            }
            ConfigError::PinMapMismatch { variant } => {
                write!(f, "Pin map is not wired for a {variant} controller")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
