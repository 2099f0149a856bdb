//! Button identifiers and decoding of the button bitfield
//!
//! [`decode_buttons`] walks [`BUTTON_BITS`] in ascending bit order and then
//! appends the triggers, so a given state always decodes to the same ordered
//! [`ButtonSet`].

use super::state_record::GamepadState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every identifier a decoded [`ButtonSet`] can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Button {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Start,
    Back,
    LeftThumb,
    RightThumb,
    LeftShoulder,
    RightShoulder,
    A,
    B,
    X,
    Y,
    LeftTrigger,
    RightTrigger,
}

/// Number of distinct button identifiers
pub const BUTTON_COUNT: usize = 16;

/// Bit position of every digital button, ascending. Bits 10 and 11 are
/// reserved and deliberately absent.
pub const BUTTON_BITS: [(u8, Button); 14] = [
    (0, Button::DpadUp),
    (1, Button::DpadDown),
    (2, Button::DpadLeft),
    (3, Button::DpadRight),
    (4, Button::Start),
    (5, Button::Back),
    (6, Button::LeftThumb),
    (7, Button::RightThumb),
    (8, Button::LeftShoulder),
    (9, Button::RightShoulder),
    (12, Button::A),
    (13, Button::B),
    (14, Button::X),
    (15, Button::Y),
];

impl Button {
    /// All identifiers in canonical order
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::Start,
        Button::Back,
        Button::LeftThumb,
        Button::RightThumb,
        Button::LeftShoulder,
        Button::RightShoulder,
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftTrigger,
        Button::RightTrigger,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Button::DpadUp => "DPAD_UP",
            Button::DpadDown => "DPAD_DOWN",
            Button::DpadLeft => "DPAD_LEFT",
            Button::DpadRight => "DPAD_RIGHT",
            Button::Start => "START",
            Button::Back => "BACK",
            Button::LeftThumb => "LEFT_THUMB",
            Button::RightThumb => "RIGHT_THUMB",
            Button::LeftShoulder => "LEFT_SHOULDER",
            Button::RightShoulder => "RIGHT_SHOULDER",
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::LeftTrigger => "LEFT_TRIGGER",
            Button::RightTrigger => "RIGHT_TRIGGER",
        }
    }

    /// Position in [`Button::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit position in the button mask, `None` for the analog triggers
    pub fn bit(self) -> Option<u8> {
        BUTTON_BITS
            .iter()
            .find(|(_, button)| *button == self)
            .map(|(bit, _)| *bit)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown button name: {0}")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Button::ALL
            .into_iter()
            .find(|button| button.name() == s)
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

/// Ordered buttons currently asserted on one slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonSet(Vec<Button>);

impl ButtonSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0.contains(&button)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Button> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Button] {
        &self.0
    }

    /// Canonical names in set order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(Button::name).collect()
    }

    fn push(&mut self, button: Button) {
        self.0.push(button);
    }
}

impl From<Vec<Button>> for ButtonSet {
    fn from(buttons: Vec<Button>) -> Self {
        Self(buttons)
    }
}

impl<'a> IntoIterator for &'a ButtonSet {
    type Item = Button;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Button>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

/// Decodes the asserted buttons of `state`
///
/// Triggers count as pressed for any value above zero.
pub fn decode_buttons(state: &GamepadState) -> ButtonSet {
    let mut pressed = ButtonSet(Vec::with_capacity(BUTTON_COUNT));

    for (bit, button) in BUTTON_BITS {
        if state.buttons.is_set(bit) {
            pressed.push(button);
        }
    }

    if state.left_trigger > 0 {
        pressed.push(Button::LeftTrigger);
    }
    if state.right_trigger > 0 {
        pressed.push(Button::RightTrigger);
    }

    pressed
}

impl GamepadState {
    pub fn pressed(&self) -> ButtonSet {
        decode_buttons(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::state_record::{ButtonMask, StatePacket};

    fn state(mask: u16, left_trigger: u8, right_trigger: u8) -> GamepadState {
        GamepadState {
            buttons: ButtonMask(mask),
            left_trigger,
            right_trigger,
            ..Default::default()
        }
    }

    #[test]
    fn every_mask_reports_exactly_its_defined_bits() {
        for mask in 0..=u16::MAX {
            let pressed = decode_buttons(&state(mask, 0, 0));

            for (bit, button) in BUTTON_BITS {
                assert_eq!(pressed.contains(button), mask & (1 << bit) != 0);
            }
            let defined = (mask & !ButtonMask::RESERVED).count_ones() as usize;
            assert_eq!(pressed.len(), defined, "mask {mask:#06x}");
        }
    }

    #[test]
    fn reserved_bits_alone_decode_to_nothing() {
        assert!(decode_buttons(&state(ButtonMask::RESERVED, 0, 0)).is_empty());
    }

    #[test]
    fn output_follows_bit_order() {
        let pad = state(u16::MAX, 1, 1);
        let first = decode_buttons(&pad);
        assert_eq!(first.as_slice(), &Button::ALL);
        for _ in 0..10 {
            assert_eq!(decode_buttons(&pad), first);
        }

        let mask = ButtonMask::Y | ButtonMask::DPAD_UP | ButtonMask::START;
        let mixed = decode_buttons(&state(mask, 0, 0));
        assert_eq!(mixed.names(), vec!["DPAD_UP", "START", "Y"]);
    }

    #[test]
    fn triggers_are_pressed_strictly_above_zero() {
        assert!(decode_buttons(&state(0, 0, 0)).is_empty());
        assert_eq!(decode_buttons(&state(0, 1, 0)).names(), vec!["LEFT_TRIGGER"]);
        assert_eq!(decode_buttons(&state(0, 0, 1)).names(), vec!["RIGHT_TRIGGER"]);
        assert_eq!(
            decode_buttons(&state(ButtonMask::A, 255, 255)).names(),
            vec!["A", "LEFT_TRIGGER", "RIGHT_TRIGGER"]
        );
    }

    #[test]
    fn synthetic_record_with_only_y() {
        let packet = StatePacket {
            sequence_number: 1,
            gamepad: state(0b1000_0000_0000_0000, 0, 0),
        };
        let decoded = StatePacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded.gamepad.pressed().names(), vec!["Y"]);
    }

    #[test]
    fn synthetic_record_with_only_left_trigger() {
        let packet = StatePacket {
            sequence_number: 7,
            gamepad: state(0, 5, 0),
        };
        let decoded = StatePacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded.gamepad.pressed().names(), vec!["LEFT_TRIGGER"]);
    }

    #[test]
    fn names_parse_back_to_buttons() {
        for button in Button::ALL {
            assert_eq!(button.name().parse::<Button>(), Ok(button));
            assert_eq!(button.to_string(), button.name());
        }
        assert_eq!(
            "_reserved_1_".parse::<Button>(),
            Err(UnknownButton("_reserved_1_".to_string()))
        );
    }

    #[test]
    fn bit_lookup_matches_mask_constants() {
        assert_eq!(Button::Y.bit(), Some(15));
        assert_eq!(Button::RightShoulder.bit(), Some(9));
        assert_eq!(Button::LeftTrigger.bit(), None);
        assert_eq!(Button::A.index(), 10);
    }
}
