//! Polling session
//!
//! Owns the binding to the native backend. A session starts `Unbound`,
//! becomes `Bound` once a backend is attached and stays bound for the rest
//! of the process; there is no way back.
//!
//! ```text
//! PollingSession<Unbound> ──bind()──► PollingSession<Bound> ──poll_all()──► [ButtonSet; 4]
//! ```

use super::backend::{BackendError, StateBackend, XInputBackend, DEFAULT_LIBRARY_CANDIDATES};
use super::buttons::ButtonSet;
use super::poller::{poll_slot, query_packet};
use super::slot::Slot;
use super::state_record::StatePacket;
use statum::{machine, state};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Library names to try when binding, in order of preference
    pub library_candidates: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            library_candidates: DEFAULT_LIBRARY_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// No usable backend on this host. Fatal, the session cannot run.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    #[error("Invalid controller slot {0}, expected 0..4")]
    InvalidSlot(u32),
}

#[state]
#[derive(Debug, Clone)]
pub enum SessionState {
    Unbound,
    Bound,
}

#[machine]
#[derive(Debug)]
pub struct PollingSession<S: SessionState> {
    settings: SessionSettings,

    // Some once bound, never taken back
    backend: Option<Box<dyn StateBackend>>,
}

impl PollingSession<Unbound> {
    pub fn create(settings: Option<SessionSettings>) -> Self {
        let settings = settings.unwrap_or_default();
        debug!("Creating polling session with settings: {:?}", settings);
        Self::new(settings, None)
    }

    /// Binds the newest available XInput library
    pub fn bind(self) -> Result<PollingSession<Bound>, SessionError> {
        info!(
            "Binding input backend from candidates {:?}",
            self.settings.library_candidates
        );

        let backend = match XInputBackend::load(self.settings.library_candidates.as_slice()) {
            Ok(backend) => backend,
            Err(e) => {
                error!("Failed to bind input backend: {}", e);
                return Err(e.into());
            }
        };

        Ok(self.bind_with(Box::new(backend)))
    }

    /// Binds an already constructed backend
    pub fn bind_with(mut self, backend: Box<dyn StateBackend>) -> PollingSession<Bound> {
        info!("Polling session bound to {}", backend.name());
        self.backend = Some(backend);
        self.transition()
    }
}

impl PollingSession<Bound> {
    /// Creates and binds in one step
    pub fn open(settings: Option<SessionSettings>) -> Result<Self, SessionError> {
        PollingSession::create(settings).bind()
    }

    pub fn backend_name(&self) -> &str {
        self.backend
            .as_deref()
            .map(|backend| backend.name())
            .unwrap_or("none")
    }

    /// Buttons pressed on `slot`, empty if the slot has no controller
    pub fn poll(&self, slot: Slot) -> ButtonSet {
        match self.backend.as_deref() {
            Some(backend) => poll_slot(backend, slot),
            None => ButtonSet::new(),
        }
    }

    /// Polls every slot in order; one slot failing never affects another
    pub fn poll_all(&self) -> [ButtonSet; 4] {
        Slot::ALL.map(|slot| self.poll(slot))
    }

    /// Full state packet of `slot`, `None` if the slot reports no data
    pub fn packet(&self, slot: Slot) -> Option<StatePacket> {
        self.backend
            .as_deref()
            .and_then(|backend| query_packet(backend, slot))
    }
}
