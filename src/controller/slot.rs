use super::session::SessionError;
use std::fmt;

/// Number of controller slots the native backend exposes
pub const XUSER_MAX_COUNT: usize = 4;

/// A controller port, 0 to 3
///
/// Carries no identity beyond its index: a controller unplugged and plugged
/// back into the same port is indistinguishable from a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    pub const ALL: [Slot; XUSER_MAX_COUNT] = [Slot(0), Slot(1), Slot(2), Slot(3)];

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// User index as passed to the native query
    pub fn user_index(self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u32> for Slot {
    type Error = SessionError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        if (index as usize) < XUSER_MAX_COUNT {
            Ok(Slot(index as u8))
        } else {
            Err(SessionError::InvalidSlot(index))
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
