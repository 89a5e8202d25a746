//! # Registration Channel
//!
//! Hands a published [`ImplementorTable`] to a [`Registrar`], or parks it in a
//! one-slot mailbox until a registrar shows up.
//!
//! ```text
//! publish(table) ── registrar installed? ── yes ──> registrar.register_implementors(table)
//!                                        └─ no ───> pending slot (last write wins)
//!
//! install_registrar(r) ── pending slot occupied? ── yes ──> r.register_implementors(pending)
//! ```
//!
//! The registrar and the pending slot share one lock, so a publish racing with
//! an install either reaches the registrar or is claimed by it. The registrar
//! itself is always called with the lock released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use tracing::{debug, info};

use crate::{model::ImplementorTable, registrar::Registrar, slot::PendingSlot};

lazy_static! {
    static ref GLOBAL_CHANNEL: RegistrationChannel = RegistrationChannel::new();
}

/// The process-wide channel.
pub fn global() -> &'static RegistrationChannel {
    &GLOBAL_CHANNEL
}

/// Publishes `table` on the process-wide channel.
pub fn publish(table: ImplementorTable) -> Delivery {
    global().publish(table)
}

/// Outcome of a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Delivery {
    /// Handed to the installed registrar.
    Delivered,
    /// Stored in the pending slot for a future registrar.
    Pending,
}

#[derive(Default)]
struct ChannelState {
    registrar: Option<Arc<dyn Registrar>>,
    pending: PendingSlot<ImplementorTable>,
}

#[derive(Default)]
pub struct RegistrationChannel {
    state: Mutex<ChannelState>,
}

impl RegistrationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    // registrars never run under this lock
    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish(&self, table: ImplementorTable) -> Delivery {
        let registrar = {
            let mut state = self.lock();
            match state.registrar.clone() {
                Some(registrar) => registrar,
                None => {
                    debug!(libraries = table.len(), "no registrar installed, deferring");
                    if state.pending.put(table).is_some() {
                        debug!("replaced previously pending implementors");
                    }
                    return Delivery::Pending;
                }
            }
        };

        debug!(libraries = table.len(), "delivering implementors");
        registrar.register_implementors(table);
        Delivery::Delivered
    }

    /// Installs `registrar`, replacing any previous one, and delivers the
    /// pending table to it if there is one.
    pub fn install_registrar(&self, registrar: Arc<dyn Registrar>) -> Delivery {
        let pending = {
            let mut state = self.lock();
            if state.registrar.replace(registrar.clone()).is_some() {
                info!("replacing installed registrar");
            }
            state.pending.claim()
        };

        match pending {
            Some(table) => {
                info!(
                    libraries = table.len(),
                    "registrar installed, delivering pending implementors"
                );
                registrar.register_implementors(table);
                Delivery::Delivered
            }
            None => {
                debug!("registrar installed, nothing pending");
                Delivery::Pending
            }
        }
    }

    pub fn uninstall_registrar(&self) -> Option<Arc<dyn Registrar>> {
        self.lock().registrar.take()
    }

    pub fn has_registrar(&self) -> bool {
        self.lock().registrar.is_some()
    }

    /// Clone of the pending table, if one is waiting.
    pub fn pending(&self) -> Option<ImplementorTable> {
        self.lock().pending.peek().cloned()
    }

    pub fn claim_pending(&self) -> Option<ImplementorTable> {
        self.lock().pending.claim()
    }
}

impl std::fmt::Debug for RegistrationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RegistrationChannel")
            .field("has_registrar", &state.registrar.is_some())
            .field("pending", &state.pending.is_occupied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registrar::RecordingRegistrar;
    use pretty_assertions::assert_eq;

    fn table(library: &str) -> ImplementorTable {
        ImplementorTable::new().with_library(library, vec![])
    }

    #[test]
    fn test_publish_without_registrar_defers() {
        let channel = RegistrationChannel::new();

        assert_eq!(channel.publish(table("a")), Delivery::Pending);
        assert_eq!(channel.pending(), Some(table("a")));
        assert!(!channel.has_registrar());
    }

    #[test]
    fn test_install_claims_pending() {
        let channel = RegistrationChannel::new();
        let recorder = Arc::new(RecordingRegistrar::new());
        channel.publish(table("a"));

        assert_eq!(channel.install_registrar(recorder.clone()), Delivery::Delivered);
        assert_eq!(recorder.calls(), vec![table("a")]);
        assert_eq!(channel.pending(), None);
    }

    #[test]
    fn test_install_with_nothing_pending() {
        let channel = RegistrationChannel::new();
        let recorder = Arc::new(RecordingRegistrar::new());

        assert_eq!(channel.install_registrar(recorder.clone()), Delivery::Pending);
        assert_eq!(recorder.call_count(), 0);
    }

    #[test]
    fn test_uninstall_returns_to_deferring() {
        let channel = RegistrationChannel::new();
        let recorder = Arc::new(RecordingRegistrar::new());
        channel.install_registrar(recorder.clone());

        assert!(channel.uninstall_registrar().is_some());
        assert_eq!(channel.publish(table("a")), Delivery::Pending);
        assert_eq!(recorder.call_count(), 0);
        assert_eq!(channel.claim_pending(), Some(table("a")));
        assert_eq!(channel.claim_pending(), None);
    }

    #[test]
    fn test_registrar_may_reenter_channel() {
        let channel = Arc::new(RegistrationChannel::new());
        let inner = channel.clone();
        channel.install_registrar(Arc::new(move |_table: ImplementorTable| {
            // runs without the channel lock held
            assert!(inner.has_registrar());
        }));

        assert_eq!(channel.publish(table("a")), Delivery::Delivered);
    }

    #[test]
    fn test_delivery_display() {
        assert_eq!(Delivery::Delivered.to_string(), "Delivered");
        assert_eq!(Delivery::Pending.to_string(), "Pending");
    }
}
