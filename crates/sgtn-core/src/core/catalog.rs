// crates/sgtn-core/src/core/catalog.rs
// ============================================================================
// Module: Message Catalog
// Description: Immutable key-to-template mapping for one (locale, component).
// Purpose: Provide lookup and positional argument substitution over messages.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`MessageCatalog`] holds the translated templates of one component in
//! one locale. Catalogs are immutable once published to the cache: updates
//! replace the whole object, so concurrent readers see either the old or the
//! new catalog and never a partial merge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Immutable mapping from message keys to template strings.
///
/// # Invariants
/// - Contents never mutate after construction; replacement is by whole-object
///   substitution in the cache.
/// - Templates use `{0}`, `{1}`, ... positional placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    /// Message templates keyed by message key.
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates a catalog from a key-to-template mapping.
    #[must_use]
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self {
            messages,
        }
    }

    /// Returns the number of messages in the catalog.
    #[must_use]
    pub fn size(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when the catalog holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the raw template for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Resolves a key and substitutes positional arguments into its template.
    ///
    /// Returns `None` when the key is absent. Placeholders without a matching
    /// argument are left verbatim.
    #[must_use]
    pub fn format(&self, key: &str, args: &[&str]) -> Option<String> {
        self.get(key).map(|template| substitute(template, args))
    }
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

/// Replaces `{0}`, `{1}`, ... placeholders with the corresponding arguments.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut text = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        text = text.replace(&format!("{{{index}}}"), arg);
    }
    text
}

// ============================================================================
// SECTION: Tests
// ============================================================================
