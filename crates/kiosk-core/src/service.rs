// SPDX-License-Identifier: Apache-2.0

//! `DisplayService` — the transport-agnostic facade combining the entity
//! store, assignment index, and subscription hub behind one service-wide
//! guard.
//!
//! All unary operations acquire the guard, do their (synchronous,
//! non-blocking) work, and release it before returning. The one streaming
//! operation, [`DisplayService::subscribe`], releases the guard for the
//! duration of its wait loop and only re-acquires it to register or
//! deregister a handle — see [`Subscription`].

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::assignment::AssignmentIndex;
use crate::entity::{EntityStore, Kiosk, Sign};
use crate::error::{CoreError, CoreResult};
use crate::hub::{DeliveryHandle, HandleId, SubscriptionHub};

/// Default session lifetime for streaming subscribers: 24 hours.
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

struct State {
    kiosks: EntityStore<Kiosk>,
    signs: EntityStore<Sign>,
    assignments: AssignmentIndex,
    hub: SubscriptionHub,
}

impl State {
    fn new() -> Self {
        Self {
            kiosks: EntityStore::new("kiosk"),
            signs: EntityStore::new("sign"),
            assignments: AssignmentIndex::new(),
            hub: SubscriptionHub::new(),
        }
    }
}

/// The in-memory display-orchestration core.
pub struct DisplayService {
    state: Mutex<State>,
    session_lifetime: Duration,
}

impl Default for DisplayService {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayService {
    pub fn new() -> Self {
        Self::with_session_lifetime(DEFAULT_SESSION_LIFETIME)
    }

    pub fn with_session_lifetime(session_lifetime: Duration) -> Self {
        Self { state: Mutex::new(State::new()), session_lifetime }
    }

    // -- Kiosks ---------------------------------------------------------

    pub async fn create_kiosk(&self, name: String, attributes: BTreeMap<String, String>) -> Kiosk {
        let mut state = self.state.lock().await;
        let kiosk = state.kiosks.create(|k, id| k.id = id, Kiosk { id: 0, name, attributes });
        debug!(kiosk_id = kiosk.id, "kiosk created");
        kiosk
    }

    pub async fn get_kiosk(&self, id: u32) -> CoreResult<Kiosk> {
        let state = self.state.lock().await;
        state.kiosks.get(id).cloned()
    }

    pub async fn list_kiosks(&self) -> Vec<Kiosk> {
        let state = self.state.lock().await;
        state.kiosks.list()
    }

    pub async fn delete_kiosk(&self, id: u32) -> CoreResult<()> {
        let mut state = self.state.lock().await;
        state.kiosks.delete(id)?;
        debug!(kiosk_id = id, "kiosk deleted (assignment and subscribers untouched)");
        Ok(())
    }

    // -- Signs ------------------------------------------------------------

    pub async fn create_sign(&self, name: String, text: Option<String>, image: Option<Vec<u8>>) -> Sign {
        let mut state = self.state.lock().await;
        let sign = state.signs.create(|s, id| s.id = id, Sign { id: 0, name, text, image });
        debug!(sign_id = sign.id, "sign created");
        sign
    }

    pub async fn get_sign(&self, id: u32) -> CoreResult<Sign> {
        let state = self.state.lock().await;
        state.signs.get(id).cloned()
    }

    pub async fn list_signs(&self) -> Vec<Sign> {
        let state = self.state.lock().await;
        state.signs.list()
    }

    pub async fn delete_sign(&self, id: u32) -> CoreResult<()> {
        let mut state = self.state.lock().await;
        state.signs.delete(id)?;
        debug!(sign_id = id, "sign deleted (assignment index left as-is)");
        Ok(())
    }

    // -- Assignment ---------------------------------------------------------

    /// Set `sign_id` for each of `kiosk_ids`, or for every kiosk-id in
    /// `[1, next_kiosk_id)` when `kiosk_ids` is empty ("set all kiosks").
    ///
    /// Does not validate that `sign_id` refers to an existing sign.
    /// Notifies every kiosk-id written, unconditionally.
    pub async fn set_sign_for_kiosks(&self, sign_id: u32, kiosk_ids: Vec<u32>) {
        let mut state = self.state.lock().await;
        if kiosk_ids.is_empty() {
            let upper = state.kiosks.next_id();
            debug!(sign_id, upper, "setting sign for all kiosks in [1, next_kiosk_id)");
            for kiosk_id in 1..upper {
                state.assignments.set(kiosk_id, sign_id);
                state.hub.publish(kiosk_id, sign_id);
            }
        } else {
            for kiosk_id in kiosk_ids {
                state.assignments.set(kiosk_id, sign_id);
                state.hub.publish(kiosk_id, sign_id);
            }
        }
    }

    /// Current assignment for `kiosk_id`. Fails `NotFound` if the kiosk
    /// does not exist; returns sign-id 0 if no assignment has ever been
    /// written.
    pub async fn get_sign_for_kiosk(&self, kiosk_id: u32) -> CoreResult<u32> {
        let state = self.state.lock().await;
        state.kiosks.get(kiosk_id)?;
        Ok(state.assignments.get(kiosk_id))
    }

    // -- Subscription ---------------------------------------------------------

    /// Begin a streaming subscription for `kiosk_id`.
    ///
    /// Validates the kiosk exists, reads the assignment in force at this
    /// instant as the initial value, and registers a delivery handle — all
    /// under the guard, which is released before returning.
    pub async fn subscribe(&self, kiosk_id: u32) -> CoreResult<Subscription<'_>> {
        let mut state = self.state.lock().await;
        state.kiosks.get(kiosk_id)?;
        let initial_sign_id = state.assignments.get(kiosk_id);
        let (handle_id, handle) = state.hub.register(kiosk_id);
        debug!(kiosk_id, handle_id, "subscriber registered");
        Ok(Subscription {
            service: self,
            kiosk_id,
            handle_id,
            handle,
            deadline: Instant::now() + self.session_lifetime,
            initial: Some(initial_sign_id),
            finished: false,
        })
    }

    async fn unregister(&self, kiosk_id: u32, handle_id: HandleId) {
        let mut state = self.state.lock().await;
        state.hub.unregister(kiosk_id, handle_id);
        debug!(kiosk_id, handle_id, "subscriber removed");
    }
}

/// A live streaming subscription for one kiosk.
///
/// Callers drive it with [`Subscription::next`] in a loop. Every exit path
/// (timer expiry, stream-send error, peer cancellation) MUST call
/// [`Subscription::finish`] exactly once so the handle is deregistered —
/// this cannot happen implicitly on drop because deregistration needs to
/// reacquire the async guard.
pub struct Subscription<'a> {
    service: &'a DisplayService,
    kiosk_id: u32,
    handle_id: HandleId,
    handle: std::sync::Arc<DeliveryHandle>,
    deadline: Instant,
    /// The snapshot taken at subscribe time; handed out by the first call
    /// to `next` before the wait loop begins, exactly as the spec's
    /// "send one initial message" step requires.
    initial: Option<u32>,
    finished: bool,
}

impl Subscription<'_> {
    /// Wait for the next sign-id to send: the subscribe-time snapshot on
    /// the first call, thereafter the next delivered update, or `None`
    /// once the session timer has fired. Does not hold the service guard
    /// while waiting.
    pub async fn next(&mut self) -> Option<u32> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        tokio::select! {
            value = self.handle.recv() => Some(value),
            _ = tokio::time::sleep_until(self.deadline) => None,
        }
    }

    /// Deregister this subscriber's handle. Idempotent.
    pub async fn finish(&mut self) {
        if !self.finished {
            self.service.unregister(self.kiosk_id, self.handle_id).await;
            self.finished = true;
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
