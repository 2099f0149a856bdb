//! Native controller-state backend
//!
//! A backend answers one question: "what is the state of slot N right now?"
//! It writes a raw record into the supplied buffer and returns the native
//! status code (`0` means the buffer was populated).
//!
//! [`XInputBackend`] binds the Windows XInput library at runtime through
//! `libloading`, preferring the newest library version present on the host.

use super::slot::Slot;
use super::state_record::StateRecordBuffer;
use libloading::Library;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Native status: the buffer was filled
pub const ERROR_SUCCESS: u32 = 0;
/// Native status: nothing is plugged into the slot
pub const ERROR_DEVICE_NOT_CONNECTED: u32 = 1167;

/// Library names in order of preference, newest first
pub const DEFAULT_LIBRARY_CANDIDATES: [&str; 3] =
    ["xinput1_4.dll", "xinput1_3.dll", "xinput9_1_0.dll"];

const GET_STATE_SYMBOL: &[u8] = b"XInputGetState\0";

type XInputGetStateFn = unsafe extern "system" fn(u32, *mut StateRecordBuffer) -> u32;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("No compatible input library found (tried {tried:?}): {reason}")]
    Unavailable { tried: Vec<String>, reason: String },
}

/// Source of raw controller state records
///
/// Implementations are immutable after construction and may be queried from
/// several threads.
pub trait StateBackend: fmt::Debug + Send + Sync {
    /// Name of the bound implementation, for logging
    fn name(&self) -> &str;

    /// Queries `slot` and fills `buffer`. Returns the native status code; on
    /// anything but [`ERROR_SUCCESS`] the buffer contents are meaningless.
    fn get_state(&self, slot: Slot, buffer: &mut StateRecordBuffer) -> u32;
}

/// XInput bound from a dynamically loaded library
pub struct XInputBackend {
    library_name: String,
    get_state: XInputGetStateFn,
    // keeps `get_state` valid
    _library: Library,
}

impl XInputBackend {
    /// Binds the first candidate that loads and exports `XInputGetState`
    pub fn load<S: AsRef<str>>(candidates: &[S]) -> Result<Self, BackendError> {
        let mut tried = Vec::with_capacity(candidates.len());
        let mut reason = String::from("no library candidates configured");

        for candidate in candidates {
            let name = candidate.as_ref();
            tried.push(name.to_string());
            debug!("Trying input library {}", name);

            match Self::bind(name) {
                Ok(backend) => {
                    info!("Bound input library {}", name);
                    return Ok(backend);
                }
                Err(e) => {
                    warn!("Input library {} unavailable: {}", name, e);
                    reason = e.to_string();
                }
            }
        }

        Err(BackendError::Unavailable { tried, reason })
    }

    fn bind(name: &str) -> Result<Self, libloading::Error> {
        // SAFETY: XInput libraries run no initialisation with preconditions on load.
        let library = unsafe { Library::new(name)? };
        // SAFETY: the symbol type matches the documented XInputGetState signature.
        let get_state = unsafe { *library.get::<XInputGetStateFn>(GET_STATE_SYMBOL)? };

        Ok(Self {
            library_name: name.to_string(),
            get_state,
            _library: library,
        })
    }
}

impl fmt::Debug for XInputBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XInputBackend")
            .field("library_name", &self.library_name)
            .finish_non_exhaustive()
    }
}

impl StateBackend for XInputBackend {
    fn name(&self) -> &str {
        &self.library_name
    }

    fn get_state(&self, slot: Slot, buffer: &mut StateRecordBuffer) -> u32 {
        // SAFETY: the buffer has the size and alignment of XINPUT_STATE and the
        // library outlives this call.
        unsafe { (self.get_state)(slot.user_index(), buffer) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_reports_every_candidate() {
        let err = XInputBackend::load(&["padwatch-missing-a.dll", "padwatch-missing-b.dll"])
            .unwrap_err();
        let BackendError::Unavailable { tried, reason } = err;
        assert_eq!(tried, vec!["padwatch-missing-a.dll", "padwatch-missing-b.dll"]);
        assert!(!reason.is_empty());
    }

    #[test]
    fn empty_candidate_list_is_unavailable() {
        let err = XInputBackend::load::<&str>(&[]).unwrap_err();
        let BackendError::Unavailable { tried, .. } = err;
        assert!(tried.is_empty());
    }
}
