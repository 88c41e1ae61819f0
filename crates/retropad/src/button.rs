//! Button sets and the folding tables between them
//!
//! [`ButtonMask`] is the normalized 8-button set every reader returns.
//! [`SnesButtons`] and [`PsxButtons`] name the native bit layouts of the
//! wider controllers; their extra buttons are OR-folded onto A and B.
//! The folding is lossy on purpose: several physical buttons share one
//! output bit.

use bitflags::bitflags;

/// Number of buttons in a [`ButtonMask`]
pub const BUTTON_COUNT: usize = 8;

bitflags! {
    /// Normalized button state, bit set = pressed on the current poll
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonMask: u8 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const UP     = 1 << 4;
        const DOWN   = 1 << 5;
        const LEFT   = 1 << 6;
        const RIGHT  = 1 << 7;
    }
}

bitflags! {
    /// SNES shift register order (first bit shifted out is bit 0)
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SnesButtons: u16 {
        const B      = 1 << 0;
        const Y      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const UP     = 1 << 4;
        const DOWN   = 1 << 5;
        const LEFT   = 1 << 6;
        const RIGHT  = 1 << 7;
        const A      = 1 << 8;
        const X      = 1 << 9;
        const L      = 1 << 10;
        const R      = 1 << 11;
    }
}

bitflags! {
    /// PlayStation digital button field, low byte first on the wire
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PsxButtons: u16 {
        const SELECT   = 1 << 0;
        const L3       = 1 << 1;
        const R3       = 1 << 2;
        const START    = 1 << 3;
        const UP       = 1 << 4;
        const RIGHT    = 1 << 5;
        const DOWN     = 1 << 6;
        const LEFT     = 1 << 7;
        const L2       = 1 << 8;
        const R2       = 1 << 9;
        const L1       = 1 << 10;
        const R1       = 1 << 11;
        const TRIANGLE = 1 << 12;
        const CIRCLE   = 1 << 13;
        const CROSS    = 1 << 14;
        const SQUARE   = 1 << 15;
    }
}

/// SNES buttons folded into [`ButtonMask::A`]
const SNES_A_GROUP: SnesButtons = SnesButtons::A.union(SnesButtons::R);
/// SNES buttons folded into [`ButtonMask::B`]
const SNES_B_GROUP: SnesButtons = SnesButtons::X.union(SnesButtons::L);

/// PlayStation buttons folded into [`ButtonMask::A`]
const PSX_A_GROUP: PsxButtons = PsxButtons::R1
    .union(PsxButtons::R2)
    .union(PsxButtons::R3)
    .union(PsxButtons::CROSS)
    .union(PsxButtons::CIRCLE);
/// PlayStation buttons folded into [`ButtonMask::B`]
const PSX_B_GROUP: PsxButtons = PsxButtons::L1
    .union(PsxButtons::L2)
    .union(PsxButtons::L3)
    .union(PsxButtons::SQUARE)
    .union(PsxButtons::TRIANGLE);

/// Pass-through pairs for the PlayStation d-pad and Select/Start
const PSX_DIRECT: [(PsxButtons, ButtonMask); 6] = [
    (PsxButtons::SELECT, ButtonMask::SELECT),
    (PsxButtons::START, ButtonMask::START),
    (PsxButtons::UP, ButtonMask::UP),
    (PsxButtons::DOWN, ButtonMask::DOWN),
    (PsxButtons::LEFT, ButtonMask::LEFT),
    (PsxButtons::RIGHT, ButtonMask::RIGHT),
];

impl ButtonMask {
    /// Map the 8 bits of an NES frame one-to-one
    pub const fn from_nes(sampled: u8) -> Self {
        Self::from_bits_retain(sampled)
    }

    /// Fold a 12-bit SNES frame onto the 8-button set
    ///
    /// Bits 0-7 map directly as on the NES. A and R fold into A, X and L
    /// fold into B.
    pub fn from_snes(sampled: SnesButtons) -> Self {
        let mut mask = Self::from_bits_retain((sampled.bits() & 0xFF) as u8);
        if sampled.intersects(SNES_A_GROUP) {
            mask |= Self::A;
        }
        if sampled.intersects(SNES_B_GROUP) {
            mask |= Self::B;
        }
        mask
    }

    /// Fold a PlayStation digital field onto the 8-button set
    ///
    /// The right-hand buttons (R1, R2, R3, Cross, Circle) become A and the
    /// left-hand ones (L1, L2, L3, Square, Triangle) become B.
    pub fn from_psx(buttons: PsxButtons) -> Self {
        let mut mask = Self::empty();
        for (psx, button) in PSX_DIRECT {
            if buttons.contains(psx) {
                mask |= button;
            }
        }
        if buttons.intersects(PSX_A_GROUP) {
            mask |= Self::A;
        }
        if buttons.intersects(PSX_B_GROUP) {
            mask |= Self::B;
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nes_bits_pass_through() {
        for sampled in 0..=u8::MAX {
            assert_eq!(ButtonMask::from_nes(sampled).bits(), sampled);
        }
    }

    #[test]
    fn test_snes_low_byte_passes_through() {
        for low in 0..=u8::MAX {
            let mask = ButtonMask::from_snes(SnesButtons::from_bits_retain(low as u16));
            assert_eq!(mask.bits(), low);
        }
    }

    #[test]
    fn test_snes_fold_table() {
        for upper in 0..16u16 {
            let mask = ButtonMask::from_snes(SnesButtons::from_bits_retain(upper << 8));

            let expect_a = upper & 0b1001 != 0; // bit 8 (A) or bit 11 (R)
            let expect_b = upper & 0b0110 != 0; // bit 9 (X) or bit 10 (L)

            assert_eq!(mask.contains(ButtonMask::A), expect_a, "upper={upper:04b}");
            assert_eq!(mask.contains(ButtonMask::B), expect_b, "upper={upper:04b}");
            assert!(
                (mask - ButtonMask::A - ButtonMask::B).is_empty(),
                "upper={upper:04b}"
            );
        }
    }

    #[test]
    fn test_psx_single_bits() {
        let expected = [
            (PsxButtons::SELECT, ButtonMask::SELECT),
            (PsxButtons::L3, ButtonMask::B),
            (PsxButtons::R3, ButtonMask::A),
            (PsxButtons::START, ButtonMask::START),
            (PsxButtons::UP, ButtonMask::UP),
            (PsxButtons::RIGHT, ButtonMask::RIGHT),
            (PsxButtons::DOWN, ButtonMask::DOWN),
            (PsxButtons::LEFT, ButtonMask::LEFT),
            (PsxButtons::L2, ButtonMask::B),
            (PsxButtons::R2, ButtonMask::A),
            (PsxButtons::L1, ButtonMask::B),
            (PsxButtons::R1, ButtonMask::A),
            (PsxButtons::TRIANGLE, ButtonMask::B),
            (PsxButtons::CIRCLE, ButtonMask::A),
            (PsxButtons::CROSS, ButtonMask::A),
            (PsxButtons::SQUARE, ButtonMask::B),
        ];

        for (bit, (psx, button)) in expected.into_iter().enumerate() {
            assert_eq!(psx.bits(), 1 << bit);
            assert_eq!(ButtonMask::from_psx(psx), button, "bit {bit}");
        }
    }

    #[test]
    fn test_psx_all_pressed() {
        assert_eq!(ButtonMask::from_psx(PsxButtons::all()), ButtonMask::all());
        assert_eq!(ButtonMask::from_psx(PsxButtons::empty()), ButtonMask::empty());
    }
}
