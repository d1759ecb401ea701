// SPDX-License-Identifier: Apache-2.0

//! Per-kiosk publish/subscribe fan-out for assignment changes.
//!
//! A [`DeliveryHandle`] is a coalescing single-slot mailbox: `offer` never
//! blocks and overwrites whatever is pending, `recv` waits for the next
//! value. This is the "bounded buffer per handle (size 1) with coalescing"
//! strategy — chosen so publishing under the service-wide guard can never
//! stall on a slow or dead subscriber, while still giving every subscriber
//! the latest assignment rather than silently dropping it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex as StdMutex;

use tokio::sync::Notify;

/// Monotonic id distinguishing handles within one kiosk's subscriber set.
pub type HandleId = u64;

/// Single-slot coalescing mailbox delivered to one streaming subscriber.
pub struct DeliveryHandle {
    slot: StdMutex<Option<u32>>,
    notify: Notify,
}

impl DeliveryHandle {
    fn new() -> Self {
        Self { slot: StdMutex::new(None), notify: Notify::new() }
    }

    /// Overwrite the pending value and wake the receiver. Never blocks.
    fn offer(&self, sign_id: u32) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(sign_id);
        self.notify.notify_one();
    }

    /// Wait for the next delivered value.
    ///
    /// Uses the standard "register-then-check" pattern so a value offered
    /// between the check and the `notified().await` is never lost.
    pub async fn recv(&self) -> u32 {
        loop {
            let notified = self.notify.notified();
            let pending = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).take();
            if let Some(value) = pending {
                return value;
            }
            notified.await;
        }
    }
}

/// Per-kiosk set of live delivery handles.
#[derive(Default)]
pub struct SubscriptionHub {
    next_handle_id: AtomicU64,
    subscribers: BTreeMap<u32, BTreeMap<HandleId, std::sync::Arc<DeliveryHandle>>>,
}

impl SubscriptionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh handle under `kiosk_id`. Caller must already have
    /// validated that the kiosk exists.
    pub fn register(&mut self, kiosk_id: u32) -> (HandleId, std::sync::Arc<DeliveryHandle>) {
        let handle_id = self.next_handle_id.fetch_add(1, Ordering::Relaxed);
        let handle = std::sync::Arc::new(DeliveryHandle::new());
        self.subscribers.entry(kiosk_id).or_default().insert(handle_id, handle.clone());
        (handle_id, handle)
    }

    /// Remove a previously registered handle.
    pub fn unregister(&mut self, kiosk_id: u32, handle_id: HandleId) {
        if let Some(set) = self.subscribers.get_mut(&kiosk_id) {
            set.remove(&handle_id);
            if set.is_empty() {
                self.subscribers.remove(&kiosk_id);
            }
        }
    }

    /// Deliver `sign_id` to every handle currently registered under
    /// `kiosk_id`. Must be called with the service-wide guard held; never
    /// blocks or awaits.
    pub fn publish(&self, kiosk_id: u32, sign_id: u32) {
        if let Some(set) = self.subscribers.get(&kiosk_id) {
            for handle in set.values() {
                handle.offer(sign_id);
            }
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self, kiosk_id: u32) -> usize {
        self.subscribers.get(&kiosk_id).map_or(0, |s| s.len())
    }
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod tests;
