use retropad::{ButtonMask, ControllerReader};
use retropad_harness::devices::ButtonPanel;
use retropad_harness::{Line, SimBus};

#[test]
fn every_line_combination_maps_to_its_bit() {
    let bus = SimBus::new(ButtonPanel::default());
    let mut reader = bus.direct_reader();
    reader.init().unwrap();

    for pressed in 0..=u8::MAX {
        bus.with_device(|panel| panel.set_pressed(pressed));
        let mask = reader.read().unwrap();
        assert_eq!(mask.bits(), pressed, "lines low: {pressed:08b}");
    }
}

#[test]
fn line_order_matches_button_mask() {
    let order = [
        ButtonMask::A,
        ButtonMask::B,
        ButtonMask::SELECT,
        ButtonMask::START,
        ButtonMask::UP,
        ButtonMask::DOWN,
        ButtonMask::LEFT,
        ButtonMask::RIGHT,
    ];

    for (line, button) in order.into_iter().enumerate() {
        let bus = SimBus::new(ButtonPanel::new(1 << line));
        let mut reader = bus.direct_reader();
        assert_eq!(reader.read().unwrap(), button);
    }
}

#[test]
fn released_lines_read_as_not_pressed() {
    let bus = SimBus::new(ButtonPanel::default());
    let mut reader = bus.direct_reader();
    assert!(reader.read().unwrap().is_empty());

    // All eight lines are sampled on every poll
    let sampled = bus.trace().len();
    assert_eq!(sampled, 8);
    for i in 0..8 {
        assert_eq!(bus.senses(Line::Button(i)), vec![(0, true)]);
    }
}

#[test]
fn repeated_polls_are_identical() {
    let bus = SimBus::new(ButtonPanel::new(0b1010_0101));
    let mut reader = bus.direct_reader();
    let first = reader.read().unwrap();
    let second = reader.read().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.bits(), 0b1010_0101);
}
