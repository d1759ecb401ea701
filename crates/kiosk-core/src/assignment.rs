// SPDX-License-Identifier: Apache-2.0

//! Kiosk-id → sign-id assignment index.

use std::collections::BTreeMap;

/// Functional mapping from kiosk-id to the sign-id it should currently
/// display. Absent entries mean "no sign", represented as sign-id 0.
#[derive(Default)]
pub struct AssignmentIndex {
    signs_for_kiosks: BTreeMap<u32, u32>,
}

impl AssignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current assignment for `kiosk_id`, or 0 if none has ever been set.
    pub fn get(&self, kiosk_id: u32) -> u32 {
        self.signs_for_kiosks.get(&kiosk_id).copied().unwrap_or(0)
    }

    /// Overwrite the assignment for `kiosk_id`. Returns the value so the
    /// caller can publish it without a second lookup.
    pub fn set(&mut self, kiosk_id: u32, sign_id: u32) {
        self.signs_for_kiosks.insert(kiosk_id, sign_id);
    }
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod tests;
