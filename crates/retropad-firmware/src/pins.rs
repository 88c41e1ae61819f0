//! Board wiring for the supported controllers (ESP32-C3 GPIO numbers).
//!
//! The controller is chosen at build time with one of the `controller-*`
//! cargo features.

use retropad::{Builder, Config, ConfigError};

const SELECTED_CONTROLLERS: usize = cfg!(feature = "controller-gpio") as usize
    + cfg!(feature = "controller-nes") as usize
    + cfg!(feature = "controller-snes") as usize
    + cfg!(feature = "controller-psx") as usize;

const _: () = assert!(
    SELECTED_CONTROLLERS == 1,
    "select exactly one of the controller-gpio, controller-nes, controller-snes, controller-psx features"
);

#[cfg(feature = "controller-gpio")]
mod wiring {
    // A, B, Select, Start, Up, Down, Left, Right
    pub const BUTTONS: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
}

#[cfg(any(feature = "controller-nes", feature = "controller-snes"))]
mod wiring {
    pub const CLOCK: u8 = 4;
    pub const LATCH: u8 = 5;
    pub const DATA: u8 = 6;
}

#[cfg(feature = "controller-psx")]
mod wiring {
    pub const ATTENTION: u8 = 7;
    pub const CLOCK: u8 = 4;
    pub const COMMAND: u8 = 5;
    pub const DATA: u8 = 6; // needs the internal pull-up
}

/// Pin configuration for the controller this firmware was built for.
pub fn controller_config() -> Result<Config, ConfigError> {
    let builder = Builder::new();

    #[cfg(feature = "controller-gpio")]
    let builder = builder
        .variant(retropad::Variant::Gpio)
        .buttons(wiring::BUTTONS);

    #[cfg(feature = "controller-nes")]
    let builder = builder.variant(retropad::Variant::Nes);
    #[cfg(feature = "controller-snes")]
    let builder = builder.variant(retropad::Variant::Snes);
    #[cfg(any(feature = "controller-nes", feature = "controller-snes"))]
    let builder = builder
        .clock(wiring::CLOCK)
        .latch(wiring::LATCH)
        .data(wiring::DATA);

    #[cfg(feature = "controller-psx")]
    let builder = builder
        .variant(retropad::Variant::Psx)
        .attention(wiring::ATTENTION)
        .clock(wiring::CLOCK)
        .command(wiring::COMMAND)
        .data(wiring::DATA);

    builder.build()
}
