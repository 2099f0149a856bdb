//! Controller subsystem: acquisition of native gamepad state
//!
//! Layers, leaf first:
//!
//! 1. [`state_record`] - Binary layout of the native state record
//! 2. [`buttons`] - Bitfield decoding into ordered button sets
//! 3. [`backend`] - Native library binding
//! 4. [`poller`] - One query per slot
//! 5. [`session`] - Backend lifecycle and `poll_all`
//!
//! [`combination`] and [`edge`] consume the decoded sets.
//!
//! # Architecture
//!
//! ```text
//! Backend ──► StateRecord ──► ButtonSet ──► Viewer / Combinations
//!            (16 raw bytes)  (per slot)
//! ```
//!
//! Everything runs synchronously on the caller's thread.

pub mod backend;
pub mod buttons;
pub mod combination;
pub mod edge;
pub mod poller;
pub mod session;
pub mod slot;
pub mod state_record;

pub use buttons::{decode_buttons, Button, ButtonSet};
pub use combination::{matches, Combination};
pub use edge::{ButtonDelta, PacketChange, PacketTracker};
pub use session::{Bound, PollingSession, SessionError, SessionSettings, Unbound};
pub use slot::{Slot, XUSER_MAX_COUNT};
pub use state_record::{ButtonMask, GamepadState, LayoutError, StatePacket, STATE_RECORD_SIZE};
