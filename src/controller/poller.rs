//! Per-slot polling
//!
//! One query per call, no retry and no caching. A slot that reports any
//! non-zero status yields an empty [`ButtonSet`]; callers cannot tell an
//! unplugged controller from a failed query.

use super::backend::{StateBackend, ERROR_DEVICE_NOT_CONNECTED, ERROR_SUCCESS};
use super::buttons::ButtonSet;
use super::slot::Slot;
use super::state_record::{StatePacket, StateRecordBuffer};
use tracing::{debug, trace};

/// Queries `slot` once and returns the full packet, `None` when the backend
/// reports no data.
pub fn query_packet(backend: &dyn StateBackend, slot: Slot) -> Option<StatePacket> {
    let mut buffer = StateRecordBuffer::new();

    match backend.get_state(slot, &mut buffer) {
        ERROR_SUCCESS => Some(buffer.packet()),
        ERROR_DEVICE_NOT_CONNECTED => {
            trace!("No controller in {}", slot);
            None
        }
        status => {
            debug!("{} query failed with status {} ({:#010x})", slot, status, status);
            None
        }
    }
}

/// Buttons currently pressed on `slot`
pub fn poll_slot(backend: &dyn StateBackend, slot: Slot) -> ButtonSet {
    query_packet(backend, slot)
        .map(|packet| packet.gamepad.pressed())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::backend::scripted::{ScriptedBackend, SlotResponse};
    use crate::controller::buttons::Button;
    use crate::controller::state_record::{ButtonMask, GamepadState};

    fn pad(mask: u16, left_trigger: u8) -> StatePacket {
        StatePacket {
            sequence_number: 42,
            gamepad: GamepadState {
                buttons: ButtonMask(mask),
                left_trigger,
                ..Default::default()
            },
        }
    }

    #[test]
    fn connected_slot_decodes_buttons() {
        let backend = ScriptedBackend::new([
            SlotResponse::Connected(pad(ButtonMask::A | ButtonMask::BACK, 9)),
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
        ]);

        let pressed = poll_slot(&backend, Slot::ALL[0]);
        assert_eq!(
            pressed.as_slice(),
            &[Button::Back, Button::A, Button::LeftTrigger]
        );
        assert_eq!(backend.queries(), 1);
    }

    #[test]
    fn any_failure_status_is_nothing_pressed() {
        let backend = ScriptedBackend::new([
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
            SlotResponse::Status(5),
            SlotResponse::Status(u32::MAX),
            SlotResponse::Status(1),
        ]);

        for slot in Slot::ALL {
            assert!(poll_slot(&backend, slot).is_empty());
            assert_eq!(query_packet(&backend, slot), None);
        }
    }

    #[test]
    fn query_packet_keeps_sequence_number() {
        let backend = ScriptedBackend::new([
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
            SlotResponse::Connected(pad(ButtonMask::Y, 0)),
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
            SlotResponse::Status(ERROR_DEVICE_NOT_CONNECTED),
        ]);

        let packet = query_packet(&backend, Slot::ALL[1]).unwrap();
        assert_eq!(packet.sequence_number, 42);
        assert!(packet.gamepad.buttons.y());
    }
}
