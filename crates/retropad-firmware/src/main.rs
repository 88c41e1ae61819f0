mod pins;

use esp_idf_svc::hal::{
    delay::{Ets, FreeRtos},
    gpio::{AnyIOPin, Input, Output, PinDriver, Pull},
};
use esp_idf_svc::sys::EspError;

use retropad::{
    AnyReader, ButtonMask, Config, ConfigError, Controller, DirectPinReader, PinMap,
    SerialFrameReader, ShiftProtocol, ShiftRegisterReader,
};

type InputLine = PinDriver<'static, AnyIOPin, Input>;
type OutputLine = PinDriver<'static, AnyIOPin, Output>;
type Reader = AnyReader<InputLine, OutputLine, Ets>;

/// One poll per 60 Hz frame
const POLL_INTERVAL_MS: u32 = 16;

/// Reasons the reader could not be set up
#[derive(Debug)]
enum SetupError {
    Config(ConfigError),
    Pin(EspError),
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl From<EspError> for SetupError {
    fn from(e: EspError) -> Self {
        SetupError::Pin(e)
    }
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetupError::Config(e) => write!(f, "Configuration error: {e}"),
            SetupError::Pin(e) => write!(f, "Failed to claim controller pins: {e}"),
        }
    }
}

fn input(pin: u8, pull: Pull) -> Result<InputLine, EspError> {
    // SAFETY: Config guarantees each line number is bound to a single role,
    // and nothing else in this firmware claims GPIO peripherals.
    let mut line = PinDriver::input(unsafe { AnyIOPin::new(i32::from(pin)) })?;
    line.set_pull(pull)?;
    Ok(line)
}

fn output(pin: u8) -> Result<OutputLine, EspError> {
    // SAFETY: see `input`
    PinDriver::output(unsafe { AnyIOPin::new(i32::from(pin)) })
}

/// Claim the configured lines and build the matching reader.
fn build_reader(config: &Config) -> Result<Reader, SetupError> {
    config.check()?;
    let reader = match config.pins {
        PinMap::Gpio([a, b, select, start, up, down, left, right]) => DirectPinReader::new([
            input(a, Pull::Up)?,
            input(b, Pull::Up)?,
            input(select, Pull::Up)?,
            input(start, Pull::Up)?,
            input(up, Pull::Up)?,
            input(down, Pull::Up)?,
            input(left, Pull::Up)?,
            input(right, Pull::Up)?,
        ])
        .into(),
        PinMap::ShiftRegister { clock, latch, data } => ShiftRegisterReader::new(
            ShiftProtocol::try_from(config.variant)?,
            output(clock)?,
            output(latch)?,
            input(data, Pull::Floating)?,
            Ets,
        )
        .into(),
        PinMap::Serial {
            attention,
            clock,
            command,
            data,
        } => SerialFrameReader::new(
            output(attention)?,
            output(clock)?,
            output(command)?,
            input(data, Pull::Up)?,
            Ets,
        )
        .into(),
    };
    Ok(reader)
}

fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1000);
    }
}

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // Validate wiring before any pin is touched
    let config = match pins::controller_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Controller configuration invalid: {e}");
            halt();
        }
    };

    log::info!("Starting {} controller on {:?}", config.variant, config.pins);

    let reader = match build_reader(&config) {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("Controller setup failed: {e}");
            halt();
        }
    };

    let mut controller = Controller::new(reader);
    if let Err(e) = controller.init() {
        log::error!("Controller init failed: {e}");
        halt();
    }

    let mut last_buttons = ButtonMask::empty();
    loop {
        match controller.read() {
            Ok(buttons) if buttons != last_buttons => {
                log::info!("Buttons: {:?}", buttons);
                last_buttons = buttons;
            }
            Ok(_) => {}
            Err(e) => log::warn!("Controller poll failed: {e}"),
        }

        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
