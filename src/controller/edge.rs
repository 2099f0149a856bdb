//! Change detection between consecutive polls
//!
//! [`PacketTracker`] uses the native sequence number to tell whether a slot
//! changed since the last observation. [`ButtonSet::diff`] turns two
//! consecutive button sets into press and release edges.

use super::buttons::{Button, ButtonSet};
use super::slot::{Slot, XUSER_MAX_COUNT};
use super::state_record::StatePacket;

/// Outcome of observing one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketChange {
    /// New sequence number, or first packet after absence
    Changed,
    /// Same sequence number as the previous observation
    Unchanged,
    /// The slot returned no packet
    Absent,
}

/// Last seen sequence number per slot
#[derive(Debug, Clone, Default)]
pub struct PacketTracker {
    last: [Option<u32>; XUSER_MAX_COUNT],
}

impl PacketTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, slot: Slot, packet: Option<&StatePacket>) -> PacketChange {
        let last = &mut self.last[slot.index()];

        match packet {
            None => {
                *last = None;
                PacketChange::Absent
            }
            Some(packet) if *last == Some(packet.sequence_number) => PacketChange::Unchanged,
            Some(packet) => {
                *last = Some(packet.sequence_number);
                PacketChange::Changed
            }
        }
    }

    pub fn last_sequence(&self, slot: Slot) -> Option<u32> {
        self.last[slot.index()]
    }
}

/// Buttons that went down or up between two polls, in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonDelta {
    pub pressed: Vec<Button>,
    pub released: Vec<Button>,
}

impl ButtonDelta {
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }
}

impl ButtonSet {
    /// Edges from `previous` to `self`
    pub fn diff(&self, previous: &ButtonSet) -> ButtonDelta {
        let mut delta = ButtonDelta::default();

        for button in Button::ALL {
            match (previous.contains(button), self.contains(button)) {
                (false, true) => delta.pressed.push(button),
                (true, false) => delta.released.push(button),
                _ => {}
            }
        }

        delta
    }
}
