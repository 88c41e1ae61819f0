//! Controller configuration types and builder

use crate::button::BUTTON_COUNT;
pub use crate::error::ConfigError;

/// Supported controller hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// One active-low GPIO line per button
    Gpio,
    /// NES pad, 8-bit shift register
    Nes,
    /// SNES pad, 12-bit shift register
    Snes,
    /// PlayStation-style digital pad on a synchronous serial bus
    Psx,
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Variant::Gpio => "GPIO",
            Variant::Nes => "NES",
            Variant::Snes => "SNES",
            Variant::Psx => "PlayStation",
        };
        f.write_str(name)
    }
}

/// Protocol role a physical line can play
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRole {
    /// Shift/bit clock (output)
    Clock,
    /// Shift register latch (output)
    Latch,
    /// Serial attention/select, active low (output)
    Attention,
    /// Serial command line (output)
    Command,
    /// Data from the controller (input)
    Data,
    /// The eight direct button lines (inputs, pulled up)
    Buttons,
}

impl core::fmt::Display for PinRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            PinRole::Clock => "clock",
            PinRole::Latch => "latch",
            PinRole::Attention => "attention",
            PinRole::Command => "command",
            PinRole::Data => "data",
            PinRole::Buttons => "buttons",
        };
        f.write_str(name)
    }
}

/// Physical line assignment for the selected variant
///
/// Line identifiers are opaque to the driver; the firmware maps them to GPIO
/// numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMap {
    /// Button lines in [`ButtonMask`](crate::ButtonMask) bit order:
    /// A, B, Select, Start, Up, Down, Left, Right
    Gpio([u8; BUTTON_COUNT]),
    /// NES / SNES lines
    ShiftRegister { clock: u8, latch: u8, data: u8 },
    /// PlayStation lines
    Serial {
        attention: u8,
        clock: u8,
        command: u8,
        data: u8,
    },
}

impl PinMap {
    fn lines(&self) -> ([u8; BUTTON_COUNT], usize) {
        let mut lines = [0; BUTTON_COUNT];
        let count = match *self {
            PinMap::Gpio(buttons) => {
                lines = buttons;
                BUTTON_COUNT
            }
            PinMap::ShiftRegister { clock, latch, data } => {
                lines[..3].copy_from_slice(&[clock, latch, data]);
                3
            }
            PinMap::Serial {
                attention,
                clock,
                command,
                data,
            } => {
                lines[..4].copy_from_slice(&[attention, clock, command, data]);
                4
            }
        };
        (lines, count)
    }

    fn check_distinct(&self) -> Result<(), ConfigError> {
        let (lines, count) = self.lines();
        for i in 0..count {
            if lines[i + 1..count].contains(&lines[i]) {
                return Err(ConfigError::DuplicatePin { pin: lines[i] });
            }
        }
        Ok(())
    }
}

/// Controller configuration
///
/// Immutable once built. Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Selected controller hardware
    pub variant: Variant,
    /// Line assignment, matching `variant`
    pub pins: PinMap,
}

impl Config {
    /// Check that `pins` is the pin map `variant` is wired with
    ///
    /// Always true for a Config from [`Builder::build()`]. Readers built from a
    /// hand-assembled Config should check it first.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PinMapMismatch`] if the pin map belongs to another
    /// variant.
    pub fn check(&self) -> Result<(), ConfigError> {
        let fits = matches!(
            (self.variant, self.pins),
            (Variant::Gpio, PinMap::Gpio(_))
                | (Variant::Nes | Variant::Snes, PinMap::ShiftRegister { .. })
                | (Variant::Psx, PinMap::Serial { .. })
        );
        if fits {
            Ok(())
        } else {
            Err(ConfigError::PinMapMismatch {
                variant: self.variant,
            })
        }
    }
}

/// Builder for constructing controller configuration
///
/// # Example
///
/// ```
/// use retropad::{Builder, PinMap, Variant};
///
/// let config = Builder::new()
///     .variant(Variant::Psx)
///     .attention(10)
///     .clock(6)
///     .command(7)
///     .data(2)
///     .build()
///     .expect("valid configuration");
///
/// assert!(matches!(config.pins, PinMap::Serial { attention: 10, .. }));
/// ```
#[derive(Default)]
pub struct Builder {
    /// Controller variant (required)
    variant: Option<Variant>,
    clock: Option<u8>,
    latch: Option<u8>,
    attention: Option<u8>,
    command: Option<u8>,
    data: Option<u8>,
    buttons: Option<[u8; BUTTON_COUNT]>,
}

impl Builder {
    /// Create a new Builder with nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the controller variant (required)
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the clock line (NES, SNES, PlayStation)
    pub fn clock(mut self, pin: u8) -> Self {
        self.clock = Some(pin);
        self
    }

    /// Set the latch line (NES, SNES)
    pub fn latch(mut self, pin: u8) -> Self {
        self.latch = Some(pin);
        self
    }

    /// Set the attention line (PlayStation)
    pub fn attention(mut self, pin: u8) -> Self {
        self.attention = Some(pin);
        self
    }

    /// Set the command line (PlayStation)
    pub fn command(mut self, pin: u8) -> Self {
        self.command = Some(pin);
        self
    }

    /// Set the data line (NES, SNES, PlayStation)
    pub fn data(mut self, pin: u8) -> Self {
        self.data = Some(pin);
        self
    }

    /// Set the eight button lines (GPIO), in A, B, Select, Start, Up, Down,
    /// Left, Right order
    pub fn buttons(mut self, pins: [u8; BUTTON_COUNT]) -> Self {
        self.buttons = Some(pins);
        self
    }

    fn is_bound(&self, role: PinRole) -> bool {
        match role {
            PinRole::Clock => self.clock.is_some(),
            PinRole::Latch => self.latch.is_some(),
            PinRole::Attention => self.attention.is_some(),
            PinRole::Command => self.command.is_some(),
            PinRole::Data => self.data.is_some(),
            PinRole::Buttons => self.buttons.is_some(),
        }
    }

    fn reject(&self, variant: Variant, roles: &[PinRole]) -> Result<(), ConfigError> {
        match roles.iter().find(|role| self.is_bound(**role)) {
            Some(&role) => Err(ConfigError::UnexpectedPin { variant, role }),
            None => Ok(()),
        }
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingVariant` if no variant was selected
    /// - `ConfigError::MissingPin` if a role the variant needs is unbound
    /// - `ConfigError::UnexpectedPin` if a role the variant ignores is bound
    /// - `ConfigError::DuplicatePin` if one line is bound twice
    pub fn build(self) -> Result<Config, ConfigError> {
        let variant = self.variant.ok_or(ConfigError::MissingVariant)?;

        let pins = match variant {
            Variant::Gpio => {
                self.reject(
                    variant,
                    &[
                        PinRole::Clock,
                        PinRole::Latch,
                        PinRole::Attention,
                        PinRole::Command,
                        PinRole::Data,
                    ],
                )?;
                PinMap::Gpio(required(self.buttons, PinRole::Buttons)?)
            }
            Variant::Nes | Variant::Snes => {
                self.reject(
                    variant,
                    &[PinRole::Attention, PinRole::Command, PinRole::Buttons],
                )?;
                PinMap::ShiftRegister {
                    clock: required(self.clock, PinRole::Clock)?,
                    latch: required(self.latch, PinRole::Latch)?,
                    data: required(self.data, PinRole::Data)?,
                }
            }
            Variant::Psx => {
                self.reject(variant, &[PinRole::Latch, PinRole::Buttons])?;
                PinMap::Serial {
                    attention: required(self.attention, PinRole::Attention)?,
                    clock: required(self.clock, PinRole::Clock)?,
                    command: required(self.command, PinRole::Command)?,
                    data: required(self.data, PinRole::Data)?,
                }
            }
        };

        pins.check_distinct()?;
        log::debug!("{variant} controller configured: {pins:?}");

        Ok(Config { variant, pins })
    }
}

fn required<T>(value: Option<T>, role: PinRole) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingPin { role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variant() {
        let result = Builder::new().clock(1).latch(2).data(3).build();
        assert_eq!(result, Err(ConfigError::MissingVariant));
    }

    #[test]
    fn test_shift_register_config() {
        let config = Builder::new()
            .variant(Variant::Snes)
            .clock(4)
            .latch(5)
            .data(6)
            .build()
            .unwrap();
        assert_eq!(config.variant, Variant::Snes);
        assert_eq!(
            config.pins,
            PinMap::ShiftRegister {
                clock: 4,
                latch: 5,
                data: 6
            }
        );
    }

    #[test]
    fn test_missing_serial_command_pin() {
        let result = Builder::new()
            .variant(Variant::Psx)
            .attention(1)
            .clock(2)
            .data(3)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::MissingPin {
                role: PinRole::Command
            })
        );
    }

    #[test]
    fn test_unexpected_pin_for_variant() {
        let result = Builder::new()
            .variant(Variant::Nes)
            .clock(1)
            .latch(2)
            .data(3)
            .command(4)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::UnexpectedPin {
                variant: Variant::Nes,
                role: PinRole::Command
            })
        );

        let result = Builder::new()
            .variant(Variant::Gpio)
            .buttons([0, 1, 2, 3, 4, 5, 6, 7])
            .data(8)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::UnexpectedPin {
                role: PinRole::Data,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_pins() {
        let result = Builder::new()
            .variant(Variant::Nes)
            .clock(3)
            .latch(4)
            .data(3)
            .build();
        assert_eq!(result, Err(ConfigError::DuplicatePin { pin: 3 }));

        let result = Builder::new()
            .variant(Variant::Gpio)
            .buttons([0, 1, 2, 3, 4, 5, 6, 0])
            .build();
        assert_eq!(result, Err(ConfigError::DuplicatePin { pin: 0 }));
    }

    #[test]
    fn test_gpio_config() {
        let config = Builder::new()
            .variant(Variant::Gpio)
            .buttons([10, 11, 12, 13, 14, 15, 16, 17])
            .build()
            .unwrap();
        assert_eq!(config.pins, PinMap::Gpio([10, 11, 12, 13, 14, 15, 16, 17]));
    }

    #[test]
    fn test_built_configs_pass_check() {
        let config = Builder::new()
            .variant(Variant::Nes)
            .clock(1)
            .latch(2)
            .data(3)
            .build()
            .unwrap();
        assert_eq!(config.check(), Ok(()));
    }

    #[test]
    fn test_hand_assembled_mismatch_fails_check() {
        let config = Config {
            variant: Variant::Psx,
            pins: PinMap::ShiftRegister {
                clock: 1,
                latch: 2,
                data: 3,
            },
        };
        assert_eq!(
            config.check(),
            Err(ConfigError::PinMapMismatch {
                variant: Variant::Psx
            })
        );

        let config = Config {
            variant: Variant::Nes,
            pins: PinMap::Gpio([0, 1, 2, 3, 4, 5, 6, 7]),
        };
        assert_eq!(
            config.check(),
            Err(ConfigError::PinMapMismatch {
                variant: Variant::Nes
            })
        );
    }
}
