// crates/sgtn-core/src/interfaces/mod.rs
// ============================================================================
// Module: Singleton Interfaces
// Description: Source-agnostic fetch contract and shared error types.
// Purpose: Define the seam between the data service and message transports.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The [`MessageSource`] trait is the single contract every message transport
//! implements: the remote HTTP fetcher, a local bundle reader, and test
//! stubs all return the same classified responses. Implementations must be
//! safe for concurrent invocation and must not retain partial results on
//! failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use thiserror::Error;

use crate::core::identifiers::Component;
use crate::core::identifiers::Locale;

// ============================================================================
// SECTION: Response Classification
// ============================================================================

/// Raw key-to-template mapping produced by a source.
pub type MessageMap = HashMap<String, String>;

/// Classified successful outcome of a source fetch.
///
/// # Invariants
/// - `Updated` carries a complete replacement value; the service publishes it
///   wholesale.
/// - `NotModified` never carries a value; the cached entry stays in place.
/// - `Partial` marks a well-formed response without usable data; it is never
///   published to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResponse<T> {
    /// The source returned a replacement value.
    Updated {
        /// Replacement value.
        value: T,
        /// Version token to present on the next conditional fetch.
        etag: Option<String>,
    },
    /// The source indicated the cached value is still current.
    NotModified {
        /// Version token echoed by the source, when present.
        etag: Option<String>,
    },
    /// The response parsed but carried no data for the request.
    Partial,
}

impl<T> SourceResponse<T> {
    /// Maps the carried value, preserving the response classification.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> SourceResponse<U> {
        match self {
            Self::Updated {
                value,
                etag,
            } => SourceResponse::Updated {
                value: op(value),
                etag,
            },
            Self::NotModified {
                etag,
            } => SourceResponse::NotModified {
                etag,
            },
            Self::Partial => SourceResponse::Partial,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Source fetch errors.
///
/// # Invariants
/// - `Transport` messages preserve the transport-identifying phrase of the
///   underlying failure (e.g. `unsupported protocol scheme`).
/// - `Status` messages include the numeric HTTP status.
/// - Variants are `Clone` so a single-flight leader's failure can be handed
///   to every coalesced follower.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network, DNS, TLS, or URL failure before an HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-2xx HTTP status from the source.
    #[error("HTTP status {0} from message source")]
    Status(u16),
    /// Malformed payload or schema mismatch.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors surfaced by the data service and translation façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The source fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The source answered but returned no data; nothing was cached.
    #[error("no data from message source for {subject}")]
    NoData {
        /// Human-readable description of the requested entry.
        subject: String,
    },
    /// The catalog was found but the key is absent.
    #[error("No key in locale {locale}, component {component}: {key}")]
    NoKey {
        /// Locale actually consulted (requested or default).
        locale: Locale,
        /// Component actually consulted.
        component: Component,
        /// Missing message key.
        key: String,
    },
}

// ============================================================================
// SECTION: Message Source
// ============================================================================

/// Source-agnostic fetch contract for translation data.
///
/// An `etag` of `None` requests an unconditional fetch; `Some` asks the
/// source to answer `NotModified` when the entry is unchanged.
pub trait MessageSource: Send + Sync {
    /// Fetches the message catalog of one component in one locale.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails, the source answers
    /// with a non-2xx status, or the payload cannot be decoded.
    fn fetch_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
        etag: Option<&str>,
    ) -> Result<SourceResponse<MessageMap>, FetchError>;

    /// Fetches the ambient-product component list.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails or the payload cannot
    /// be decoded.
    fn fetch_component_list(
        &self,
        etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Component>>, FetchError>;

    /// Fetches the list of locales the product is translated into.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails or the payload cannot
    /// be decoded.
    fn fetch_locale_list(
        &self,
        etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Locale>>, FetchError>;
}
