//! Pluggable merge behavior.

use std::fmt::Debug;

use tracing::debug;

use super::DocumentStore;
use crate::{CaptureRecord, Fingerprint};

/// Decides how a new capture enters a controller's store.
///
/// Implementations receive the store of the record's controller and return the key the
/// record is (or already was) stored under.
///
/// # Implementing a custom strategy
///
/// ```rust
/// use apidocs_core::{CaptureRecord, DocumentStore, Fingerprint, MergeStrategy};
///
/// /// Documents each action at most once.
/// #[derive(Debug)]
/// struct OnePerAction;
///
/// impl MergeStrategy for OnePerAction {
///     fn merge(&self, store: &mut DocumentStore, record: CaptureRecord) -> Fingerprint {
///         let fingerprint = Fingerprint::from(format!("ID-{}", record.action));
///         store.merge(record.action.clone(), fingerprint.clone(), record);
///         fingerprint
///     }
/// }
/// ```
pub trait MergeStrategy: Debug + Send + Sync {
    /// Merges `record` into `store`.
    fn merge(&self, store: &mut DocumentStore, record: CaptureRecord) -> Fingerprint;
}

/// Stores each capture under its [`Fingerprint`], replacing an existing record with the
/// same key.
///
/// Re-running a test therefore refreshes headers and body of its example.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceByFingerprint;

impl MergeStrategy for ReplaceByFingerprint {
    fn merge(&self, store: &mut DocumentStore, record: CaptureRecord) -> Fingerprint {
        let fingerprint = Fingerprint::of(&record);
        let action = record.action.clone();
        if store.merge(action, fingerprint.clone(), record).is_some() {
            debug!(%fingerprint, "example refreshed");
        }
        fingerprint
    }
}

/// Stores each capture under its [`Fingerprint`] but never replaces a known example.
///
/// Keeps committed documentation stable when responses contain volatile data such as
/// timestamps or generated identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepFirstCapture;

impl MergeStrategy for KeepFirstCapture {
    fn merge(&self, store: &mut DocumentStore, record: CaptureRecord) -> Fingerprint {
        let fingerprint = Fingerprint::of(&record);
        if store.contains(&record.action, &fingerprint) {
            debug!(%fingerprint, "example already documented, keeping it");
        } else {
            let action = record.action.clone();
            store.merge(action, fingerprint.clone(), record);
        }
        fingerprint
    }
}
