use retropad::{
    Builder, ButtonMask, Config, ConfigError, Controller, ControllerReader, PinMap, PsxButtons,
    ShiftProtocol, Variant,
};
use retropad_harness::devices::{ButtonPanel, PsxPad, ShiftRegisterPad};
use retropad_harness::{Line, SimBus};

fn psx_config() -> Config {
    Builder::new()
        .variant(Variant::Psx)
        .attention(10)
        .clock(6)
        .command(7)
        .data(2)
        .build()
        .unwrap()
}

#[test]
fn first_read_primes_serial_pad_before_polling() {
    let bus = SimBus::new(PsxPad::new(PsxButtons::START));
    let mut controller = Controller::new(bus.reader_for(&psx_config()).unwrap());
    assert_eq!(controller.variant(), Variant::Psx);

    // No explicit init
    assert_eq!(controller.read().unwrap(), ButtonMask::START);

    bus.with_device(|pad| {
        let commands = pad.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], vec![0x00]);
        assert_eq!(commands[1], vec![0x00]);
        assert_eq!(commands[2], vec![0x01, 0x42, 0xFF, 0xFF, 0xFF]);
    });
}

#[test]
fn init_runs_once() {
    let bus = SimBus::new(PsxPad::new(PsxButtons::empty()));
    let mut controller = Controller::new(bus.serial_reader());
    controller.init().unwrap();
    controller.init().unwrap();
    controller.read().unwrap();

    // Two priming frames and one poll
    bus.with_device(|pad| assert_eq!(pad.commands().len(), 3));
}

#[test]
fn is_pressed_polls_every_call() {
    let bus = SimBus::new(ShiftRegisterPad::nes(ButtonMask::A.bits()));
    let mut controller = Controller::new(bus.shift_register_reader(ShiftProtocol::Nes));

    assert!(controller.is_pressed(ButtonMask::A).unwrap());

    // Input changes between two checks in the same tick
    bus.with_device(|pad| pad.set_buttons(u16::from(ButtonMask::B.bits())));
    assert!(!controller.is_pressed(ButtonMask::A).unwrap());
    assert!(controller.is_pressed(ButtonMask::B).unwrap());

    assert_eq!(bus.with_device(|pad| pad.latches()), 3);
}

#[test]
fn config_selects_each_variant() {
    let gpio = Builder::new()
        .variant(Variant::Gpio)
        .buttons([0, 1, 2, 3, 4, 5, 6, 7])
        .build()
        .unwrap();
    let bus = SimBus::new(ButtonPanel::new(0b0001_0001));
    let mut controller = Controller::new(bus.reader_for(&gpio).unwrap());
    assert_eq!(controller.variant(), Variant::Gpio);
    assert_eq!(controller.read().unwrap(), ButtonMask::A | ButtonMask::UP);

    for (variant, pad) in [
        (Variant::Nes, ShiftRegisterPad::nes(0b1000_0000)),
        (Variant::Snes, ShiftRegisterPad::snes(1 << 11)),
    ] {
        let config = Builder::new()
            .variant(variant)
            .clock(4)
            .latch(5)
            .data(6)
            .build()
            .unwrap();
        let bus = SimBus::new(pad);
        let mut controller = Controller::new(bus.reader_for(&config).unwrap());
        assert_eq!(controller.variant(), variant);

        let expected = match variant {
            Variant::Nes => ButtonMask::RIGHT,
            _ => ButtonMask::A,
        };
        assert_eq!(controller.read().unwrap(), expected);
    }
}

#[test]
fn unchanged_input_gives_identical_masks_for_every_variant() {
    let gpio = SimBus::new(ButtonPanel::new(0b0110_0011));
    let mut direct = Controller::new(gpio.direct_reader());
    assert_eq!(direct.read().unwrap(), direct.read().unwrap());

    let nes = SimBus::new(ShiftRegisterPad::nes(0b0101_1010));
    let mut nes = Controller::new(nes.shift_register_reader(ShiftProtocol::Nes));
    assert_eq!(nes.read().unwrap(), nes.read().unwrap());

    let snes = SimBus::new(ShiftRegisterPad::snes(0x0C33));
    let mut snes = Controller::new(snes.shift_register_reader(ShiftProtocol::Snes));
    assert_eq!(snes.read().unwrap(), snes.read().unwrap());

    let psx = SimBus::new(PsxPad::new(PsxButtons::L1 | PsxButtons::LEFT));
    let mut psx = Controller::new(psx.serial_reader());
    assert_eq!(psx.read().unwrap(), psx.read().unwrap());
}

#[test]
fn release_returns_the_reader() {
    let bus = SimBus::new(ShiftRegisterPad::snes(0));
    let mut controller = Controller::new(bus.shift_register_reader(ShiftProtocol::Snes));
    controller.read().unwrap();

    let reader = controller.release();
    assert_eq!(reader.variant(), Variant::Snes);
    assert_eq!(reader.protocol(), ShiftProtocol::Snes);

    // Init left the clock idle high before the frame
    assert_eq!(bus.drives(Line::Clock).first(), Some(&(0, true)));
}

#[test]
fn mismatched_config_builds_no_reader() {
    let bus = SimBus::new(ShiftRegisterPad::nes(0));

    let psx_on_shift_register = Config {
        variant: Variant::Psx,
        pins: PinMap::ShiftRegister {
            clock: 4,
            latch: 5,
            data: 6,
        },
    };
    assert_eq!(
        bus.reader_for(&psx_on_shift_register).err(),
        Some(ConfigError::PinMapMismatch {
            variant: Variant::Psx
        })
    );

    let gpio_on_shift_register = Config {
        variant: Variant::Gpio,
        ..psx_on_shift_register
    };
    assert_eq!(
        bus.reader_for(&gpio_on_shift_register).err(),
        Some(ConfigError::PinMapMismatch {
            variant: Variant::Gpio
        })
    );

    // Nothing was touched
    assert!(bus.trace().is_empty());
}
