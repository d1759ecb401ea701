// SPDX-License-Identifier: Apache-2.0

//! Kiosk and sign entity stores.
//!
//! Each store is a simple id-keyed map plus a monotonic next-id counter.
//! Both stores reset their counter to 1 once the map becomes empty again —
//! bug-compatible with the original source (see DESIGN.md).

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};

/// A registered display endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kiosk {
    pub id: u32,
    pub name: String,
    /// Opaque descriptive passthrough (e.g. "location", "model"). Stored
    /// and returned verbatim; never interpreted by the core.
    pub attributes: BTreeMap<String, String>,
}

/// A content unit shown on kiosks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sign {
    pub id: u32,
    pub name: String,
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// An id-keyed entity map with a monotonic allocator.
///
/// Generic over the stored value so `Kiosk` and `Sign` share one
/// implementation; `label` is used only for error messages.
pub struct EntityStore<T> {
    label: &'static str,
    next_id: u32,
    entries: BTreeMap<u32, T>,
}

impl<T> EntityStore<T> {
    pub fn new(label: &'static str) -> Self {
        Self { label, next_id: 1, entries: BTreeMap::new() }
    }

    /// Assign an id, insert, and return the stored value.
    pub fn create(&mut self, set_id: impl FnOnce(&mut T, u32), mut value: T) -> T
    where
        T: Clone,
    {
        let id = self.next_id;
        set_id(&mut value, id);
        self.entries.insert(id, value.clone());
        self.next_id += 1;
        value
    }

    pub fn get(&self, id: u32) -> CoreResult<&T> {
        self.entries
            .get(&id)
            .ok_or_else(|| CoreError::not_found(format!("{} {id} not found", self.label)))
    }

    pub fn list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.values().cloned().collect()
    }

    /// Delete an entry. If the map becomes empty, reset the id counter to 1.
    pub fn delete(&mut self, id: u32) -> CoreResult<()> {
        if self.entries.remove(&id).is_none() {
            return Err(CoreError::not_found(format!("{} {id} not found", self.label)));
        }
        if self.entries.is_empty() {
            self.next_id = 1;
        }
        Ok(())
    }

    pub fn exists(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
