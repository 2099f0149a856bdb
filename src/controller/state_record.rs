//! Binary layout of the native controller state record
//!
//! The native query fills a fixed 16 byte record:
//!
//! ```text
//! offset  size  field
//!      0     4  sequence number (u32)
//!      4     2  button mask     (u16)
//!      6     1  left trigger    (u8)
//!      7     1  right trigger   (u8)
//!      8     2  left stick X    (i16)
//!     10     2  left stick Y    (i16)
//!     12     2  right stick X   (i16)
//!     14     2  right stick Y   (i16)
//! ```
//!
//! All multi-byte fields are little-endian. Decoding is pure and never
//! allocates.

use std::mem::{align_of, size_of};
use thiserror::Error;

/// Size in bytes of one native state record
pub const STATE_RECORD_SIZE: usize = 16;

const SEQUENCE_OFFSET: usize = 0;
const BUTTONS_OFFSET: usize = 4;
const LEFT_TRIGGER_OFFSET: usize = 6;
const RIGHT_TRIGGER_OFFSET: usize = 7;
const LEFT_STICK_X_OFFSET: usize = 8;
const LEFT_STICK_Y_OFFSET: usize = 10;
const RIGHT_STICK_X_OFFSET: usize = 12;
const RIGHT_STICK_Y_OFFSET: usize = 14;

/// Errors raised when a raw buffer does not match the record layout
///
/// Seeing one of these means the caller handed over a wrong buffer or the
/// native ABI changed. It is never a runtime condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("State record too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}

/// Button bitfield as reported by the native backend
///
/// Bits 10 and 11 are reserved. They are kept in the raw value but no
/// accessor or decoded set ever reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonMask(pub u16);

impl ButtonMask {
    /// bit 0
    pub const DPAD_UP: u16 = 1 << 0;
    /// bit 1
    pub const DPAD_DOWN: u16 = 1 << 1;
    /// bit 2
    pub const DPAD_LEFT: u16 = 1 << 2;
    /// bit 3
    pub const DPAD_RIGHT: u16 = 1 << 3;
    /// bit 4
    pub const START: u16 = 1 << 4;
    /// bit 5
    pub const BACK: u16 = 1 << 5;
    /// bit 6
    pub const LEFT_THUMB: u16 = 1 << 6;
    /// bit 7
    pub const RIGHT_THUMB: u16 = 1 << 7;
    /// bit 8
    pub const LEFT_SHOULDER: u16 = 1 << 8;
    /// bit 9
    pub const RIGHT_SHOULDER: u16 = 1 << 9;
    /// bits 10 and 11, never surfaced
    pub const RESERVED: u16 = (1 << 10) | (1 << 11);
    /// bit 12
    pub const A: u16 = 1 << 12;
    /// bit 13
    pub const B: u16 = 1 << 13;
    /// bit 14
    pub const X: u16 = 1 << 14;
    /// bit 15
    pub const Y: u16 = 1 << 15;

    pub fn bits(self) -> u16 {
        self.0
    }

    /// Tests a single bit position (0..16)
    pub fn is_set(self, bit: u8) -> bool {
        bit < 16 && self.0 & (1 << bit) != 0
    }

    fn has(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    pub fn dpad_up(self) -> bool {
        self.has(Self::DPAD_UP)
    }

    pub fn dpad_down(self) -> bool {
        self.has(Self::DPAD_DOWN)
    }

    pub fn dpad_left(self) -> bool {
        self.has(Self::DPAD_LEFT)
    }

    pub fn dpad_right(self) -> bool {
        self.has(Self::DPAD_RIGHT)
    }

    pub fn start(self) -> bool {
        self.has(Self::START)
    }

    pub fn back(self) -> bool {
        self.has(Self::BACK)
    }

    pub fn left_thumb(self) -> bool {
        self.has(Self::LEFT_THUMB)
    }

    pub fn right_thumb(self) -> bool {
        self.has(Self::RIGHT_THUMB)
    }

    pub fn left_shoulder(self) -> bool {
        self.has(Self::LEFT_SHOULDER)
    }

    pub fn right_shoulder(self) -> bool {
        self.has(Self::RIGHT_SHOULDER)
    }

    pub fn a(self) -> bool {
        self.has(Self::A)
    }

    pub fn b(self) -> bool {
        self.has(Self::B)
    }

    pub fn x(self) -> bool {
        self.has(Self::X)
    }

    pub fn y(self) -> bool {
        self.has(Self::Y)
    }

    /// Raw value of the reserved bits, for diagnostics only
    pub fn reserved(self) -> u16 {
        self.0 & Self::RESERVED
    }
}

/// Snapshot of one gamepad's buttons, triggers and sticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub buttons: ButtonMask,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub left_stick_x: i16,
    pub left_stick_y: i16,
    pub right_stick_x: i16,
    pub right_stick_y: i16,
}

/// One answer of the native query
///
/// `sequence_number` only changes when the controller state changed, so two
/// packets with the same number carry the same gamepad state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatePacket {
    pub sequence_number: u32,
    pub gamepad: GamepadState,
}

impl StatePacket {
    /// Decodes the first [`STATE_RECORD_SIZE`] bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, LayoutError> {
        let record: &[u8; STATE_RECORD_SIZE] = bytes
            .get(..STATE_RECORD_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(LayoutError::TooShort {
                expected: STATE_RECORD_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self::from_record(record))
    }

    /// Decodes an exactly sized record, which cannot fail
    pub fn from_record(record: &[u8; STATE_RECORD_SIZE]) -> Self {
        let u16_at = |offset: usize| u16::from_le_bytes([record[offset], record[offset + 1]]);
        let i16_at = |offset: usize| i16::from_le_bytes([record[offset], record[offset + 1]]);

        Self {
            sequence_number: u32::from_le_bytes([
                record[SEQUENCE_OFFSET],
                record[SEQUENCE_OFFSET + 1],
                record[SEQUENCE_OFFSET + 2],
                record[SEQUENCE_OFFSET + 3],
            ]),
            gamepad: GamepadState {
                buttons: ButtonMask(u16_at(BUTTONS_OFFSET)),
                left_trigger: record[LEFT_TRIGGER_OFFSET],
                right_trigger: record[RIGHT_TRIGGER_OFFSET],
                left_stick_x: i16_at(LEFT_STICK_X_OFFSET),
                left_stick_y: i16_at(LEFT_STICK_Y_OFFSET),
                right_stick_x: i16_at(RIGHT_STICK_X_OFFSET),
                right_stick_y: i16_at(RIGHT_STICK_Y_OFFSET),
            },
        }
    }

    /// Writes the packet back into the native record layout
    pub fn encode(&self) -> [u8; STATE_RECORD_SIZE] {
        let mut record = [0u8; STATE_RECORD_SIZE];
        let pad = &self.gamepad;

        record[SEQUENCE_OFFSET..SEQUENCE_OFFSET + 4]
            .copy_from_slice(&self.sequence_number.to_le_bytes());
        record[BUTTONS_OFFSET..BUTTONS_OFFSET + 2].copy_from_slice(&pad.buttons.0.to_le_bytes());
        record[LEFT_TRIGGER_OFFSET] = pad.left_trigger;
        record[RIGHT_TRIGGER_OFFSET] = pad.right_trigger;
        record[LEFT_STICK_X_OFFSET..LEFT_STICK_X_OFFSET + 2]
            .copy_from_slice(&pad.left_stick_x.to_le_bytes());
        record[LEFT_STICK_Y_OFFSET..LEFT_STICK_Y_OFFSET + 2]
            .copy_from_slice(&pad.left_stick_y.to_le_bytes());
        record[RIGHT_STICK_X_OFFSET..RIGHT_STICK_X_OFFSET + 2]
            .copy_from_slice(&pad.right_stick_x.to_le_bytes());
        record[RIGHT_STICK_Y_OFFSET..RIGHT_STICK_Y_OFFSET + 2]
            .copy_from_slice(&pad.right_stick_y.to_le_bytes());

        record
    }
}

/// `#[repr(C)]` mirror of the native `XINPUT_STATE`, used only to pin the
/// layout at compile time.
#[repr(C)]
#[allow(dead_code)]
struct NativeStateRecord {
    packet_number: u32,
    buttons: u16,
    left_trigger: u8,
    right_trigger: u8,
    thumb_lx: i16,
    thumb_ly: i16,
    thumb_rx: i16,
    thumb_ry: i16,
}

/// Output buffer handed to the native query
///
/// Aligned like the native struct so the backend may write through a typed
/// pointer.
#[repr(C, align(4))]
#[derive(Debug, Clone, Copy, Default)]
pub struct StateRecordBuffer(pub [u8; STATE_RECORD_SIZE]);

const _: () = assert!(size_of::<NativeStateRecord>() == STATE_RECORD_SIZE);
const _: () = assert!(size_of::<StateRecordBuffer>() == STATE_RECORD_SIZE);
const _: () = assert!(align_of::<StateRecordBuffer>() >= align_of::<NativeStateRecord>());

impl StateRecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.0.as_mut_ptr()
    }

    pub fn bytes(&self) -> &[u8; STATE_RECORD_SIZE] {
        &self.0
    }

    pub fn packet(&self) -> StatePacket {
        StatePacket::from_record(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packet() -> StatePacket {
        StatePacket {
            sequence_number: 0x0102_0304,
            gamepad: GamepadState {
                buttons: ButtonMask(ButtonMask::A | ButtonMask::DPAD_LEFT),
                left_trigger: 12,
                right_trigger: 255,
                left_stick_x: -32768,
                left_stick_y: 32767,
                right_stick_x: -1,
                right_stick_y: 300,
            },
        }
    }

    #[test]
    fn decodes_fields_at_native_offsets() {
        let bytes = [
            0x04, 0x03, 0x02, 0x01, // sequence
            0x04, 0x10, // buttons: DPAD_LEFT | A
            12, 255, // triggers
            0x00, 0x80, // left x = -32768
            0xFF, 0x7F, // left y = 32767
            0xFF, 0xFF, // right x = -1
            0x2C, 0x01, // right y = 300
        ];

        let packet = StatePacket::decode(&bytes).unwrap();
        assert_eq!(packet, sample_packet());
        assert!(packet.gamepad.buttons.a());
        assert!(packet.gamepad.buttons.dpad_left());
        assert!(!packet.gamepad.buttons.y());
    }

    #[test]
    fn encode_produces_native_bytes() {
        let record = sample_packet().encode();
        assert_eq!(&record[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&record[4..6], &[0x04, 0x10]);
        assert_eq!(record[6], 12);
        assert_eq!(record[7], 255);
        assert_eq!(&record[8..10], &[0x00, 0x80]);
        assert_eq!(StatePacket::from_record(&record), sample_packet());
    }

    #[test]
    fn extra_trailing_bytes_are_ignored() {
        let mut bytes = sample_packet().encode().to_vec();
        bytes.extend_from_slice(&[0xAA; 8]);
        assert_eq!(StatePacket::decode(&bytes).unwrap(), sample_packet());
    }

    #[test]
    fn every_short_buffer_is_a_layout_error() {
        let full = sample_packet().encode();
        for len in 0..STATE_RECORD_SIZE {
            let err = StatePacket::decode(&full[..len]).unwrap_err();
            assert_eq!(
                err,
                LayoutError::TooShort {
                    expected: STATE_RECORD_SIZE,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn reserved_bits_stay_in_raw_value_only() {
        let mask = ButtonMask(ButtonMask::RESERVED);
        assert_eq!(mask.reserved(), 0x0C00);
        assert!(mask.is_set(10));
        assert!(mask.is_set(11));
        assert!(!mask.is_set(16));
        assert!(!mask.right_shoulder());
        assert!(!mask.a());
    }

    #[test]
    fn buffer_round_trips_through_packet() {
        let mut buffer = StateRecordBuffer::new();
        buffer.0 = sample_packet().encode();
        assert_eq!(buffer.packet(), sample_packet());
    }
}
