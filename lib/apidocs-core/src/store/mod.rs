//! In-memory documentation corpus.
//!
//! A [`DocumentStore`] holds the examples of one controller, keyed by action then by
//! [`Fingerprint`]. A [`GroupedStore`] adds the controller level on top. Both only grow:
//! merging never removes an unrelated entry, and replacing an entry keeps its position
//! so that serializing again produces the same ordering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{CaptureRecord, Fingerprint, sanitize};

mod strategy;
pub use self::strategy::{KeepFirstCapture, MergeStrategy, ReplaceByFingerprint};

/// Examples of one controller: `action → fingerprint → record`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore {
    actions: IndexMap<String, IndexMap<Fingerprint, CaptureRecord>>,
}

impl DocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `action` and `fingerprint`, returning the record it replaced.
    ///
    /// The last merge for a given key wins.
    pub fn merge(
        &mut self,
        action: impl Into<String>,
        fingerprint: Fingerprint,
        record: CaptureRecord,
    ) -> Option<CaptureRecord> {
        self.actions
            .entry(action.into())
            .or_default()
            .insert(fingerprint, record)
    }

    /// Returns the record stored under `action` and `fingerprint`.
    pub fn get(&self, action: &str, fingerprint: &Fingerprint) -> Option<&CaptureRecord> {
        self.actions.get(action)?.get(fingerprint)
    }

    /// Returns `true` if a record is stored under `action` and `fingerprint`.
    pub fn contains(&self, action: &str, fingerprint: &Fingerprint) -> bool {
        self.get(action, fingerprint).is_some()
    }

    /// Number of records, all actions included.
    pub fn len(&self) -> usize {
        self.actions.values().map(IndexMap::len).sum()
    }

    /// Returns `true` if the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Documented actions, in insertion order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Examples of one action, in insertion order.
    pub fn examples(&self, action: &str) -> impl Iterator<Item = (&Fingerprint, &CaptureRecord)> {
        self.actions.get(action).into_iter().flatten()
    }

    /// All records with their action and fingerprint.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint, &CaptureRecord)> {
        self.actions.iter().flat_map(|(action, examples)| {
            examples
                .iter()
                .map(move |(fingerprint, record)| (action.as_str(), fingerprint, record))
        })
    }

    fn into_entries(self) -> impl Iterator<Item = (String, Fingerprint, CaptureRecord)> {
        self.actions.into_iter().flat_map(|(action, examples)| {
            examples
                .into_iter()
                .map(move |(fingerprint, record)| (action.clone(), fingerprint, record))
        })
    }

    /// Fills route fields left empty by older file layouts and sanitizes params again.
    pub(crate) fn backfill(&mut self, controller: Option<&str>) {
        for (action, examples) in &mut self.actions {
            for record in examples.values_mut() {
                record.params = sanitize(&record.params);
                if record.action.is_empty() {
                    record.action.clone_from(action);
                }
                if record.controller.is_empty() {
                    if let Some(controller) = controller {
                        record.controller = controller.to_string();
                    }
                }
            }
        }
    }
}

/// Examples of all controllers: `controller → action → fingerprint → record`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedStore {
    groups: IndexMap<String, DocumentStore>,
}

impl GroupedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `controller`, `action` and `fingerprint`, returning the
    /// record it replaced.
    pub fn merge_grouped(
        &mut self,
        controller: impl Into<String>,
        action: impl Into<String>,
        fingerprint: Fingerprint,
        record: CaptureRecord,
    ) -> Option<CaptureRecord> {
        self.group_mut(controller).merge(action, fingerprint, record)
    }

    /// Returns the examples of `controller`.
    pub fn group(&self, controller: &str) -> Option<&DocumentStore> {
        self.groups.get(controller)
    }

    /// Returns the examples of `controller`, creating an empty group if needed.
    pub fn group_mut(&mut self, controller: impl Into<String>) -> &mut DocumentStore {
        self.groups.entry(controller.into()).or_default()
    }

    /// Returns `true` if `controller` has a group, even an empty one.
    pub fn contains_group(&self, controller: &str) -> bool {
        self.groups.contains_key(controller)
    }

    /// Replaces the group of `controller`, returning the previous one.
    pub fn insert_group(
        &mut self,
        controller: impl Into<String>,
        store: DocumentStore,
    ) -> Option<DocumentStore> {
        self.groups.insert(controller.into(), store)
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &DocumentStore)> {
        self.groups
            .iter()
            .map(|(controller, store)| (controller.as_str(), store))
    }

    /// Number of records, all groups included.
    pub fn len(&self) -> usize {
        self.groups.values().map(DocumentStore::len).sum()
    }

    /// Returns `true` if the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fills route fields left empty by older file layouts, using the group names.
    pub(crate) fn backfill(&mut self) {
        for (controller, store) in &mut self.groups {
            store.backfill(Some(controller));
        }
    }

    /// Merges every record of `other` into this store; `other` wins on conflicts.
    pub fn absorb(&mut self, other: GroupedStore) {
        for (controller, store) in other.groups {
            let group = self.group_mut(controller);
            for (action, fingerprint, record) in store.into_entries() {
                group.merge(action, fingerprint, record);
            }
        }
    }
}
