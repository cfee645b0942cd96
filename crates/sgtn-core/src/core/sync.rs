// crates/sgtn-core/src/core/sync.rs
// ============================================================================
// Module: Cache Synchronization Records
// Description: Per-entry refresh coordination with single-flight semantics.
// Purpose: Bound each cache entry to at most one in-flight fetch at a time.
// Dependencies: crate::core::cache, crate::interfaces
// ============================================================================

//! ## Overview
//! Every cache entry owns one [`SyncInfo`]: the timestamp of its last
//! completed fetch, the version token of its last published value, whether a
//! fetch is in flight, and the waiters blocked on that fetch. The first
//! caller to [`SyncInfo::try_begin_fetch`] becomes the leader and must
//! complete the fetch with [`SyncInfo::end_fetch`]; later callers wait on
//! [`SyncInfo::wait_update`] and observe the leader's outcome.
//!
//! `last_update` advances on every completed fetch, success or failure, so a
//! failing upstream is retried at cache-TTL cadence rather than on every
//! read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use crate::core::cache::CatalogKey;
use crate::interfaces::TranslationError;

// ============================================================================
// SECTION: Sync Info
// ============================================================================

/// Mutable coordination state guarded by the [`SyncInfo`] mutex.
#[derive(Debug, Default)]
struct SyncState {
    /// True while a fetch for this entry is in flight.
    fetching: bool,
    /// Completion time of the last fetch, successful or not.
    last_update: Option<Instant>,
    /// Version token of the last published value.
    etag: Option<String>,
    /// Error of the most recent completed fetch, if it failed.
    last_error: Option<TranslationError>,
}

/// Per-entry refresh coordination record.
///
/// # Invariants
/// - At most one fetch is in flight per record (single-flight).
/// - `last_update` advances only in [`SyncInfo::end_fetch`], after the
///   replacement value has been published to the cache.
/// - `etag` advances only when a fetch reports a changed value.
#[derive(Debug, Default)]
pub struct SyncInfo {
    /// Coordination state.
    state: Mutex<SyncState>,
    /// Waiters blocked on the in-flight fetch.
    updated: Condvar,
}

impl SyncInfo {
    /// Creates a record that has never been fetched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to become the leader for a fetch of this entry.
    ///
    /// Returns true for exactly one caller until [`SyncInfo::end_fetch`]
    /// completes the fetch; that caller must perform the fetch. Later
    /// callers receive false and should wait with [`SyncInfo::wait_update`].
    #[must_use]
    pub fn try_begin_fetch(&self) -> bool {
        let mut state = self.lock_state();
        if state.fetching {
            return false;
        }
        state.fetching = true;
        true
    }

    /// Completes the in-flight fetch and wakes all waiters.
    ///
    /// `last_update` advances regardless of the outcome; `etag` is replaced
    /// only when the fetch produced a new token.
    pub fn end_fetch(&self, etag: Option<String>, error: Option<TranslationError>) {
        let mut state = self.lock_state();
        state.fetching = false;
        state.last_update = Some(Instant::now());
        if let Some(tag) = etag {
            state.etag = Some(tag);
        }
        state.last_error = error;
        self.updated.notify_all();
    }

    /// Returns true when the entry has never completed a fetch or its age
    /// has reached the given threshold.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.lock_state().last_update.is_none_or(|at| at.elapsed() >= ttl)
    }

    /// Blocks until the in-flight fetch, if any, completes.
    ///
    /// Test observability hook for joining background refreshes; production
    /// readers never block on it.
    pub fn wait_update(&self) {
        let mut state = self.lock_state();
        while state.fetching {
            state = self.updated.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Forces the next [`SyncInfo::is_expired`] check to report stale.
    pub fn invalidate(&self) {
        self.lock_state().last_update = None;
    }

    /// Returns the version token of the last published value.
    #[must_use]
    pub fn etag(&self) -> Option<String> {
        self.lock_state().etag.clone()
    }

    /// Returns the error of the most recent completed fetch, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<TranslationError> {
        self.lock_state().last_error.clone()
    }

    // State is a set of whole-value fields; a poisoned lock still holds a
    // coherent snapshot, and waiters must be woken even if a holder panicked.
    fn lock_state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Sync Registry
// ============================================================================

/// Registry of synchronization records, one per cache entry.
///
/// # Invariants
/// - A catalog key maps to the same [`SyncInfo`] for the process lifetime.
/// - The component-list and locale-list records exist from construction.
#[derive(Debug, Default)]
pub struct SyncRegistry {
    /// Records for component catalogs, created on first access.
    catalogs: Mutex<HashMap<CatalogKey, Arc<SyncInfo>>>,
    /// Record for the ambient-product component list.
    component_list: Arc<SyncInfo>,
    /// Record for the locale list.
    locale_list: Arc<SyncInfo>,
}

impl SyncRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a catalog key, creating it on first access.
    #[must_use]
    pub fn catalog_info(&self, key: &CatalogKey) -> Arc<SyncInfo> {
        let mut catalogs = self.catalogs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = catalogs.get(key) {
            return Arc::clone(info);
        }
        let info = Arc::new(SyncInfo::new());
        catalogs.insert(key.clone(), Arc::clone(&info));
        info
    }

    /// Returns the record for the component list.
    #[must_use]
    pub fn component_list_info(&self) -> Arc<SyncInfo> {
        Arc::clone(&self.component_list)
    }

    /// Returns the record for the locale list.
    #[must_use]
    pub fn locale_list_info(&self) -> Arc<SyncInfo> {
        Arc::clone(&self.locale_list)
    }
}
