//! Button combinations
//!
//! A combination is pressed when every one of its buttons is in the pressed
//! set. Order and repetition inside the combination do not matter.

use super::buttons::{Button, ButtonSet};
use serde::{Deserialize, Serialize};

/// True iff every button in `required` is in `pressed`
pub fn matches(pressed: &ButtonSet, required: &[Button]) -> bool {
    required.iter().all(|button| pressed.contains(*button))
}

/// Named set of buttons loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub name: String,
    pub buttons: Vec<Button>,
}

impl Combination {
    pub fn new(name: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            name: name.into(),
            buttons,
        }
    }

    pub fn is_pressed(&self, pressed: &ButtonSet) -> bool {
        matches(pressed, &self.buttons)
    }

    /// Index of the first slot holding the whole combination
    pub fn any_slot(&self, slots: &[ButtonSet]) -> Option<usize> {
        slots.iter().position(|pressed| self.is_pressed(pressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(buttons: &[Button]) -> ButtonSet {
        ButtonSet::from(buttons.to_vec())
    }

    #[test]
    fn empty_requirement_always_matches() {
        assert!(matches(&ButtonSet::new(), &[]));
        assert!(matches(&pressed(&Button::ALL), &[]));
        assert!(matches(&pressed(&[Button::A]), &[]));
    }

    #[test]
    fn subset_test_ignores_order_and_duplicates() {
        let held = pressed(&[Button::DpadUp, Button::Start, Button::A, Button::LeftTrigger]);

        assert!(matches(&held, &[Button::A, Button::Start]));
        assert!(matches(&held, &[Button::Start, Button::A]));
        assert!(matches(&held, &[Button::A, Button::A, Button::Start, Button::A]));
        assert!(matches(&held, &[Button::LeftTrigger]));
        assert!(!matches(&held, &[Button::A, Button::B]));
        assert!(!matches(&held, &[Button::B, Button::B]));
        assert!(!matches(&ButtonSet::new(), &[Button::Y]));
    }

    #[test]
    fn combination_finds_first_matching_slot() {
        let quit = Combination::new("quit", vec![Button::Start, Button::Back]);
        let slots = [
            pressed(&[Button::Start]),
            ButtonSet::new(),
            pressed(&[Button::Start, Button::Back, Button::X]),
            pressed(&[Button::Back, Button::Start]),
        ];

        assert!(!quit.is_pressed(&slots[0]));
        assert_eq!(quit.any_slot(&slots), Some(2));
        assert_eq!(quit.any_slot(&slots[..2]), None);
    }
}
