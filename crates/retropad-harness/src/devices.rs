//! Simulated controllers.
//!
//! Button state is given active-high (bit set = pressed); the devices put it
//! on the wire active-low like the real hardware.

use retropad::PsxButtons;

use crate::{Device, Line};

/// Eight pulled-up buttons, one line each.
#[derive(Debug, Default)]
pub struct ButtonPanel {
    pressed: u8,
}

impl ButtonPanel {
    /// Panel with the lines in `pressed` held low.
    pub fn new(pressed: u8) -> Self {
        Self { pressed }
    }

    /// Change which buttons are held.
    pub fn set_pressed(&mut self, pressed: u8) {
        self.pressed = pressed;
    }
}

impl Device for ButtonPanel {
    fn drive(&mut self, _line: Line, _high: bool) {}

    fn sense(&mut self, line: Line) -> bool {
        match line {
            Line::Button(i) => self.pressed & (1 << i) == 0,
            _ => true,
        }
    }
}

/// 4021-style parallel-in serial-out pad (NES: 8 bits, SNES: 12 bits).
///
/// While latch is high the register follows the buttons. Each rising clock
/// edge with latch low shifts the next bit onto data; released bits fill in
/// behind.
#[derive(Debug)]
pub struct ShiftRegisterPad {
    width: u8,
    buttons: u16,
    register: u16,
    latch: bool,
    clock: bool,
    latches: usize,
}

impl ShiftRegisterPad {
    /// Pad shifting out `width` bits of `buttons`, bit 0 first.
    pub fn new(width: u8, buttons: u16) -> Self {
        let mut pad = Self {
            width,
            buttons: 0,
            register: 0,
            latch: false,
            clock: true,
            latches: 0,
        };
        pad.set_buttons(buttons);
        pad
    }

    /// NES pad.
    pub fn nes(buttons: u8) -> Self {
        Self::new(8, u16::from(buttons))
    }

    /// SNES pad.
    pub fn snes(buttons: u16) -> Self {
        Self::new(12, buttons)
    }

    /// Change which buttons are held; bits beyond the pad width are dropped.
    pub fn set_buttons(&mut self, buttons: u16) {
        self.buttons = buttons & ((1u16 << self.width) - 1);
    }

    /// Number of latch pulses seen.
    pub fn latches(&self) -> usize {
        self.latches
    }
}

impl Device for ShiftRegisterPad {
    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::Latch => {
                if high && !self.latch {
                    self.latches += 1;
                }
                self.latch = high;
                if high {
                    self.register = self.buttons;
                }
            }
            Line::Clock => {
                if high && !self.clock && !self.latch {
                    self.register >>= 1;
                }
                self.clock = high;
            }
            _ => {}
        }
    }

    fn sense(&mut self, line: Line) -> bool {
        if self.latch {
            self.register = self.buttons;
        }
        match line {
            Line::Data => self.register & 1 == 0,
            _ => true,
        }
    }
}

/// Mode byte of a digital pad
pub const DIGITAL_MODE: u8 = 0x41;
/// Mode byte of a pad in analog mode
pub const ANALOG_MODE: u8 = 0x73;

/// PlayStation-style pad.
///
/// Responds only while attention is low. The next response bit is put on
/// data at each falling clock edge and the command bit is taken at the
/// rising edge. Every attention assertion opens a new entry in
/// [`commands`](Self::commands).
#[derive(Debug)]
pub struct PsxPad {
    buttons: PsxButtons,
    mode: u8,
    selected: bool,
    clock: bool,
    command: bool,
    data_high: bool,
    byte_index: usize,
    bit_index: u8,
    out_byte: u8,
    in_byte: u8,
    commands: Vec<Vec<u8>>,
}

impl PsxPad {
    /// Digital pad holding `buttons`.
    pub fn new(buttons: PsxButtons) -> Self {
        Self {
            buttons,
            mode: DIGITAL_MODE,
            selected: false,
            clock: true,
            command: true,
            data_high: true,
            byte_index: 0,
            bit_index: 0,
            out_byte: 0xFF,
            in_byte: 0,
            commands: Vec::new(),
        }
    }

    /// Report a different mode byte in the header.
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    /// Change which buttons are held.
    pub fn set_buttons(&mut self, buttons: PsxButtons) {
        self.buttons = buttons;
    }

    /// Command bytes received, one entry per attention assertion.
    pub fn commands(&self) -> &[Vec<u8>] {
        &self.commands
    }

    /// Wire byte sent back for the byte at `index` in a frame.
    pub fn response(&self, index: usize) -> u8 {
        let [low, high] = self.buttons.bits().to_le_bytes();
        match index {
            1 => self.mode,
            2 => 0x5A,
            3 => !low,
            4 => !high,
            _ => 0xFF,
        }
    }
}

impl Device for PsxPad {
    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::Attention => {
                if !high && !self.selected {
                    self.byte_index = 0;
                    self.bit_index = 0;
                    self.in_byte = 0;
                    self.out_byte = self.response(0);
                    self.commands.push(Vec::new());
                }
                self.selected = !high;
                self.data_high = true;
            }
            Line::Command => self.command = high,
            Line::Clock => {
                if self.selected && !high && self.clock {
                    self.data_high = (self.out_byte >> self.bit_index) & 1 != 0;
                }
                if self.selected && high && !self.clock {
                    if self.command {
                        self.in_byte |= 1 << self.bit_index;
                    }
                    self.bit_index += 1;
                    if self.bit_index == 8 {
                        if let Some(frame) = self.commands.last_mut() {
                            frame.push(self.in_byte);
                        }
                        self.in_byte = 0;
                        self.bit_index = 0;
                        self.byte_index += 1;
                        self.out_byte = self.response(self.byte_index);
                    }
                }
                self.clock = high;
            }
            _ => {}
        }
    }

    fn sense(&mut self, line: Line) -> bool {
        match line {
            Line::Data => !self.selected || self.data_high,
            _ => true,
        }
    }
}

/// Answers every clocked byte with the same wire byte, attention or not.
#[derive(Debug)]
pub struct ByteResponder {
    wire: u8,
    clock: bool,
    bit_index: u8,
    data_high: bool,
}

impl ByteResponder {
    /// Responder putting `wire` on data, LSB first.
    pub fn new(wire: u8) -> Self {
        Self {
            wire,
            clock: true,
            bit_index: 0,
            data_high: true,
        }
    }
}

impl Device for ByteResponder {
    fn drive(&mut self, line: Line, high: bool) {
        if line != Line::Clock {
            return;
        }
        if !high && self.clock {
            self.data_high = (self.wire >> self.bit_index) & 1 != 0;
        }
        if high && !self.clock {
            self.bit_index = (self.bit_index + 1) % 8;
        }
        self.clock = high;
    }

    fn sense(&mut self, line: Line) -> bool {
        line != Line::Data || self.data_high
    }
}

/// Nothing plugged in: every input idles high.
#[derive(Debug, Default)]
pub struct Disconnected;

impl Device for Disconnected {
    fn drive(&mut self, _line: Line, _high: bool) {}

    fn sense(&mut self, _line: Line) -> bool {
        true
    }
}
