// crates/sgtn-core/src/runtime/service.rs
// ============================================================================
// Module: Translation Data Service
// Description: Read-through cache with single-flight refresh coordination.
// Purpose: Serve bounded-latency reads while converging on upstream state.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The data service answers every read from the cache when it can. A fresh
//! hit returns immediately; a stale hit returns the cached value and spawns
//! a background revalidation; a miss performs a synchronous fetch with all
//! concurrent callers coalesced behind one leader. Background refresh
//! failures are recorded on the entry's [`SyncInfo`] and never surface to
//! readers holding cached data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::core::cache::CacheStore;
use crate::core::cache::CatalogKey;
use crate::core::catalog::MessageCatalog;
use crate::core::identifiers::Component;
use crate::core::identifiers::Locale;
use crate::core::sync::SyncInfo;
use crate::core::sync::SyncRegistry;
use crate::interfaces::FetchError;
use crate::interfaces::MessageSource;
use crate::interfaces::SourceResponse;
use crate::interfaces::TranslationError;

// ============================================================================
// SECTION: Cache Slots
// ============================================================================

/// Binding of one cache entry kind to its read, fetch, and publish paths.
///
/// The slot owns everything a background refresh needs, so a leader can hand
/// it to a spawned thread without touching the service again.
trait CacheSlot: Send + 'static {
    /// Published value type served to readers.
    type Value: Clone + Send + 'static;

    /// Reads the published value from the cache.
    fn read(&self) -> Option<Self::Value>;

    /// Fetches a replacement value from the source.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the source fails.
    fn fetch(&self, etag: Option<&str>) -> Result<SourceResponse<Self::Value>, FetchError>;

    /// Publishes a replacement value to the cache.
    fn publish(&self, value: Self::Value);

    /// Describes the entry for error messages.
    fn subject(&self) -> String;
}

/// Slot for one (locale, component) message catalog.
struct CatalogSlot {
    /// Shared cache store.
    cache: Arc<CacheStore>,
    /// Shared message source.
    source: Arc<dyn MessageSource>,
    /// Entry key.
    key: CatalogKey,
}

impl CacheSlot for CatalogSlot {
    type Value = Arc<MessageCatalog>;

    fn read(&self) -> Option<Self::Value> {
        self.cache.component_messages(&self.key)
    }

    fn fetch(&self, etag: Option<&str>) -> Result<SourceResponse<Self::Value>, FetchError> {
        self.source
            .fetch_component_messages(&self.key.locale, &self.key.component, etag)
            .map(|response| response.map(|messages| Arc::new(MessageCatalog::new(messages))))
    }

    fn publish(&self, value: Self::Value) {
        self.cache.put_component_messages(self.key.clone(), value);
    }

    fn subject(&self) -> String {
        self.key.to_string()
    }
}

/// Slot for the ambient-product component list.
struct ComponentListSlot {
    /// Shared cache store.
    cache: Arc<CacheStore>,
    /// Shared message source.
    source: Arc<dyn MessageSource>,
}

impl CacheSlot for ComponentListSlot {
    type Value = Arc<Vec<Component>>;

    fn read(&self) -> Option<Self::Value> {
        self.cache.component_list()
    }

    fn fetch(&self, etag: Option<&str>) -> Result<SourceResponse<Self::Value>, FetchError> {
        self.source.fetch_component_list(etag).map(|response| response.map(Arc::new))
    }

    fn publish(&self, value: Self::Value) {
        self.cache.put_component_list(value);
    }

    fn subject(&self) -> String {
        "component list".to_string()
    }
}

/// Slot for the locale list.
struct LocaleListSlot {
    /// Shared cache store.
    cache: Arc<CacheStore>,
    /// Shared message source.
    source: Arc<dyn MessageSource>,
}

impl CacheSlot for LocaleListSlot {
    type Value = Arc<Vec<Locale>>;

    fn read(&self) -> Option<Self::Value> {
        self.cache.locale_list()
    }

    fn fetch(&self, etag: Option<&str>) -> Result<SourceResponse<Self::Value>, FetchError> {
        self.source.fetch_locale_list(etag).map(|response| response.map(Arc::new))
    }

    fn publish(&self, value: Self::Value) {
        self.cache.put_locale_list(value);
    }

    fn subject(&self) -> String {
        "locale list".to_string()
    }
}

// ============================================================================
// SECTION: Data Service
// ============================================================================

/// Read-through translation data service.
///
/// # Invariants
/// - At most one fetch is in flight per cache entry (single-flight).
/// - A replacement value is published before its entry's `last_update`
///   advances and before waiters are released.
/// - Stale-hit reads never block on the network.
#[derive(Clone)]
pub struct DataService {
    /// Published catalogs and lists.
    cache: Arc<CacheStore>,
    /// Per-entry refresh coordination.
    sync: Arc<SyncRegistry>,
    /// Upstream message source.
    source: Arc<dyn MessageSource>,
    /// Staleness threshold for cached entries.
    cache_ttl: Duration,
}

impl DataService {
    /// Creates a data service over a message source.
    #[must_use]
    pub fn new(source: Arc<dyn MessageSource>, cache_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(CacheStore::new()),
            sync: Arc::new(SyncRegistry::new()),
            source,
            cache_ttl,
        }
    }

    /// Returns the message catalog of one component in one locale.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the entry is absent from the cache
    /// and the fetch fails or yields no data.
    pub fn get_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
    ) -> Result<Arc<MessageCatalog>, TranslationError> {
        let key = CatalogKey::new(locale.clone(), component.clone());
        let info = self.sync.catalog_info(&key);
        let slot = CatalogSlot {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
            key,
        };
        self.read_through(&info, slot)
    }

    /// Returns the ambient-product component list.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the list is absent from the cache
    /// and the fetch fails or yields no data.
    pub fn get_component_list(&self) -> Result<Arc<Vec<Component>>, TranslationError> {
        let info = self.sync.component_list_info();
        let slot = ComponentListSlot {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
        };
        self.read_through(&info, slot)
    }

    /// Returns the list of locales the product is translated into.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the list is absent from the cache
    /// and the fetch fails or yields no data.
    pub fn get_locale_list(&self) -> Result<Arc<Vec<Locale>>, TranslationError> {
        let info = self.sync.locale_list_info();
        let slot = LocaleListSlot {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
        };
        self.read_through(&info, slot)
    }

    /// Returns the underlying cache store.
    #[must_use]
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Returns the refresh coordination registry.
    #[must_use]
    pub fn sync_registry(&self) -> &SyncRegistry {
        &self.sync
    }

    /// Serves one read through the cache and refresh discipline.
    fn read_through<S: CacheSlot>(
        &self,
        info: &Arc<SyncInfo>,
        slot: S,
    ) -> Result<S::Value, TranslationError> {
        if let Some(value) = slot.read() {
            if info.is_expired(self.cache_ttl) && info.try_begin_fetch() {
                let info = Arc::clone(info);
                thread::spawn(move || {
                    // Revalidation outcome lands on the SyncInfo; readers
                    // keep the published value either way.
                    let _ = leader_fetch(&info, &slot);
                });
            }
            return Ok(value);
        }
        loop {
            if let Some(value) = slot.read() {
                return Ok(value);
            }
            if !info.is_expired(self.cache_ttl) {
                // A fetch completed within the TTL without publishing data;
                // serve its recorded outcome instead of hammering upstream.
                return Err(info.last_error().unwrap_or_else(|| TranslationError::NoData {
                    subject: slot.subject(),
                }));
            }
            if info.try_begin_fetch() {
                leader_fetch(info, &slot)?;
                return slot.read().ok_or_else(|| TranslationError::NoData {
                    subject: slot.subject(),
                });
            }
            info.wait_update();
        }
    }
}

// ============================================================================
// SECTION: Leader Fetch
// ============================================================================

/// Performs the fetch owed by a single-flight leader and completes the entry.
///
/// Publication precedes `end_fetch`, so waiters released by it observe the
/// replacement value.
fn leader_fetch<S: CacheSlot>(info: &SyncInfo, slot: &S) -> Result<(), TranslationError> {
    let etag = info.etag();
    let failure = match slot.fetch(etag.as_deref()) {
        Ok(SourceResponse::Updated {
            value,
            etag,
        }) => {
            slot.publish(value);
            info.end_fetch(etag, None);
            return Ok(());
        }
        Ok(SourceResponse::NotModified {
            etag,
        }) => {
            info.end_fetch(etag, None);
            return Ok(());
        }
        Ok(SourceResponse::Partial) => TranslationError::NoData {
            subject: slot.subject(),
        },
        Err(err) => TranslationError::Fetch(err),
    };
    info.end_fetch(None, Some(failure.clone()));
    Err(failure)
}
