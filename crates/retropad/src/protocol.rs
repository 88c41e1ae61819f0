// Controller protocol timing and command bytes
//
// All durations are minimum hold times in microseconds. Holding longer is
// safe; holding shorter shifts the wrong bit into place for the rest of the
// frame.

// Shift register (NES / SNES)
pub const LATCH_PULSE_US: u32 = 12; // Latch high, parallel load
pub const LATCH_SETTLE_US: u32 = 6; // After latch falls, before first sample
pub const CLOCK_HALF_PERIOD_US: u32 = 6; // Each clock low and high phase
pub const NES_FRAME_BITS: u8 = 8;
pub const SNES_FRAME_BITS: u8 = 12;

// Serial (PlayStation-style)
pub const ATTENTION_SETUP_US: u32 = 2; // Before attention is asserted
pub const BIT_HOLD_US: u32 = 10; // After each bit is sampled
pub const IDLE_SETTLE_US: u32 = 10; // Lines idle before priming
pub const PRIMING_SELECT_US: u32 = 10; // Attention low around a priming byte
pub const PRIMING_RELEASE_US: u32 = 12; // Attention high after a priming frame
pub const PRIMING_FRAMES: usize = 2;

pub const FRAME_START: u8 = 0x01; // New packet marker
pub const POLL_COMMAND: u8 = 0x42; // Read button state
pub const PAD_BYTE: u8 = 0xFF; // Filler, clocks out a response byte
pub const PRIMING_BYTE: u8 = 0x00;
pub const FRAME_HEADER: [u8; 3] = [FRAME_START, POLL_COMMAND, PAD_BYTE];
