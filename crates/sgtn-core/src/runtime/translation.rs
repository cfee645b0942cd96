// crates/sgtn-core/src/runtime/translation.rs
// ============================================================================
// Module: Translation Façade
// Description: Locale fallback chain and string lookup over the data service.
// Purpose: Resolve keyed strings with argument substitution and key echo.
// Dependencies: crate::core, crate::interfaces, crate::runtime::service
// ============================================================================

//! ## Overview
//! The façade resolves string lookups through a deterministic fallback
//! chain: the requested locale first, then the configured default locale.
//! A failed lookup still yields something to render: the error carries the
//! requested key as display text, so callers may show the key itself while
//! observing why resolution failed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::catalog::MessageCatalog;
use crate::core::identifiers::Component;
use crate::core::identifiers::Locale;
use crate::interfaces::TranslationError;
use crate::runtime::service::DataService;

// ============================================================================
// SECTION: String Lookup Error
// ============================================================================

/// Error of a string lookup, carrying the text to render in its place.
///
/// # Invariants
/// - `display` is the requested key, echoed verbatim.
/// - Key-absent failures name the locale and component actually consulted;
///   component-absent failures never contain the `No key in` phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct StringMessageError {
    /// Text a caller may display in place of the missing translation.
    pub display: String,
    /// Underlying resolution failure.
    pub source: TranslationError,
}

impl StringMessageError {
    /// Creates a lookup error echoing the requested key.
    fn echo(key: &str, source: TranslationError) -> Self {
        Self {
            display: key.to_string(),
            source,
        }
    }
}

// ============================================================================
// SECTION: Translation Façade
// ============================================================================

/// Locale-aware string lookup over the translation data service.
#[derive(Clone)]
pub struct Translation {
    /// Underlying data service.
    service: DataService,
    /// Locale consulted when the requested locale cannot resolve a key.
    default_locale: Locale,
}

impl Translation {
    /// Creates a façade with the given fallback locale.
    #[must_use]
    pub fn new(service: DataService, default_locale: Locale) -> Self {
        Self {
            service,
            default_locale,
        }
    }

    /// Returns the configured default locale.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Returns the message catalog of one component in one locale.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the catalog cannot be served from
    /// the cache or fetched.
    pub fn get_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
    ) -> Result<Arc<MessageCatalog>, TranslationError> {
        self.service.get_component_messages(locale, component)
    }

    /// Returns the ambient-product component list.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the list cannot be served from the
    /// cache or fetched.
    pub fn get_component_list(&self) -> Result<Arc<Vec<Component>>, TranslationError> {
        self.service.get_component_list()
    }

    /// Returns the list of locales the product is translated into.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the list cannot be served from the
    /// cache or fetched.
    pub fn get_locale_list(&self) -> Result<Arc<Vec<Locale>>, TranslationError> {
        self.service.get_locale_list()
    }

    /// Resolves one message through the locale fallback chain and substitutes
    /// positional arguments.
    ///
    /// The requested locale is consulted first. When its catalog is absent,
    /// the default locale is consulted and a hit there is a success. A key
    /// absent from a present catalog does not fall back further.
    ///
    /// # Errors
    ///
    /// Returns [`StringMessageError`] echoing the key when no catalog in the
    /// chain resolves it.
    pub fn get_string_message(
        &self,
        locale: &Locale,
        component: &Component,
        key: &str,
        args: &[&str],
    ) -> Result<String, StringMessageError> {
        match self.service.get_component_messages(locale, component) {
            Ok(catalog) => format_or_echo(&catalog, locale, component, key, args),
            Err(primary) => {
                if locale == &self.default_locale {
                    return Err(StringMessageError::echo(key, primary));
                }
                match self.service.get_component_messages(&self.default_locale, component) {
                    Ok(catalog) => {
                        format_or_echo(&catalog, &self.default_locale, component, key, args)
                    }
                    // Component absent in both locales; surface the default
                    // locale's fetch failure, not a key-level error.
                    Err(fallback) => Err(StringMessageError::echo(key, fallback)),
                }
            }
        }
    }
}

/// Substitutes arguments into a catalog hit or echoes the key on a miss.
fn format_or_echo(
    catalog: &MessageCatalog,
    locale: &Locale,
    component: &Component,
    key: &str,
    args: &[&str],
) -> Result<String, StringMessageError> {
    catalog.format(key, args).ok_or_else(|| {
        StringMessageError::echo(
            key,
            TranslationError::NoKey {
                locale: locale.clone(),
                component: component.clone(),
                key: key.to_string(),
            },
        )
    })
}
