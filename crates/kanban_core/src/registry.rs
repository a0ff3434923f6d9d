//! Insertion-ordered, id-keyed entity collection.
//!
//! # Invariants
//! - At most one entry per id.
//! - Iteration follows first-insertion order; replacing an entry keeps its
//!   slot.

use crate::model::client::Client;
use crate::model::id::RecordId;
use crate::model::project::Project;
use std::collections::BTreeMap;

/// Entities stored in a [`Registry`].
pub trait Keyed {
    fn key(&self) -> &RecordId;
}

impl Keyed for Client {
    fn key(&self) -> &RecordId {
        self.id()
    }
}

impl Keyed for Project {
    fn key(&self) -> &RecordId {
        self.id()
    }
}

#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<RecordId, T>,
    order: Vec<RecordId>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    /// Inserts `item` unless its id is taken. Returns whether it was added.
    pub fn insert_if_absent(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            return false;
        }
        self.order.push(item.key().clone());
        self.entries.insert(item.key().clone(), item);
        true
    }

    /// Inserts `item`, returning the entry it replaced.
    pub fn upsert(&mut self, item: T) -> Option<T> {
        let key = item.key().clone();
        let previous = self.entries.insert(key.clone(), item);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Entries in id order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entries.values_mut()
    }
}
