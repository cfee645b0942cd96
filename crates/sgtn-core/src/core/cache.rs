// crates/sgtn-core/src/core/cache.rs
// ============================================================================
// Module: Translation Cache Store
// Description: Thread-safe in-memory store for catalogs and name lists.
// Purpose: Serve whole-object reads and atomic replacements per cache entry.
// Dependencies: crate::core::{catalog, identifiers}
// ============================================================================

//! ## Overview
//! The cache store maps (locale, component) pairs to published message
//! catalogs, alongside the ambient-product component list and locale list.
//! Entries are visible only after their first successful fetch, persist for
//! the process lifetime, and are never evicted: the memory bound is the
//! number of distinct (locale, component) pairs observed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::core::catalog::MessageCatalog;
use crate::core::identifiers::Component;
use crate::core::identifiers::Locale;

// ============================================================================
// SECTION: Catalog Key
// ============================================================================

/// Cache key identifying one component catalog in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    /// Locale of the catalog.
    pub locale: Locale,
    /// Component of the catalog.
    pub component: Component,
}

impl CatalogKey {
    /// Creates a new catalog key.
    #[must_use]
    pub fn new(locale: Locale, component: Component) -> Self {
        Self {
            locale,
            component,
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "locale {}, component {}", self.locale, self.component)
    }
}

// ============================================================================
// SECTION: Cache Store
// ============================================================================

/// Thread-safe store of published catalogs and name lists.
///
/// # Invariants
/// - `get` and `put` are atomic with respect to each other; readers observe
///   either the previous or the replacement value, never a partial state.
/// - Values are shared immutable objects; a `put` replaces the whole entry.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Published catalogs keyed by (locale, component).
    catalogs: RwLock<HashMap<CatalogKey, Arc<MessageCatalog>>>,
    /// Ambient-product component list.
    component_list: RwLock<Option<Arc<Vec<Component>>>>,
    /// Supported locale list.
    locale_list: RwLock<Option<Arc<Vec<Locale>>>>,
}

impl CacheStore {
    /// Creates an empty cache store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the published catalog for a key, if any.
    #[must_use]
    pub fn component_messages(&self, key: &CatalogKey) -> Option<Arc<MessageCatalog>> {
        self.catalogs.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    /// Publishes a catalog, replacing any previous entry for the key.
    pub fn put_component_messages(&self, key: CatalogKey, catalog: Arc<MessageCatalog>) {
        self.catalogs.write().unwrap_or_else(PoisonError::into_inner).insert(key, catalog);
    }

    /// Returns the published component list, if any.
    #[must_use]
    pub fn component_list(&self) -> Option<Arc<Vec<Component>>> {
        self.component_list.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Publishes the component list, replacing any previous value.
    pub fn put_component_list(&self, components: Arc<Vec<Component>>) {
        *self.component_list.write().unwrap_or_else(PoisonError::into_inner) = Some(components);
    }

    /// Returns the published locale list, if any.
    #[must_use]
    pub fn locale_list(&self) -> Option<Arc<Vec<Locale>>> {
        self.locale_list.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Publishes the locale list, replacing any previous value.
    pub fn put_locale_list(&self, locales: Arc<Vec<Locale>>) {
        *self.locale_list.write().unwrap_or_else(PoisonError::into_inner) = Some(locales);
    }
}
