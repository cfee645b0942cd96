// crates/sgtn-core/tests/common/mod.rs
// ============================================================================
// Module: Test Support
// Description: Scripted message source and fixture helpers for core tests.
// ============================================================================

//! ## Overview
//! A scripted [`MessageSource`] implementation with per-entry request
//! counters, used to drive the data service and façade without a transport.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers; not every test binary uses every item."
)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use sgtn_core::Component;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::MessageMap;
use sgtn_core::MessageSource;
use sgtn_core::SourceResponse;

/// One scripted outcome for a fetch.
pub type Scripted<T> = Result<SourceResponse<T>, FetchError>;

/// Scripted message source with request accounting.
///
/// Each fetch pops the next scripted outcome for its entry; an entry with an
/// exhausted script answers 404 so unexpected fetches surface in counters
/// and results.
#[derive(Default)]
pub struct StubSource {
    catalogs: Mutex<HashMap<(String, String), VecDeque<Scripted<MessageMap>>>>,
    component_lists: Mutex<VecDeque<Scripted<Vec<Component>>>>,
    locale_lists: Mutex<VecDeque<Scripted<Vec<Locale>>>>,
    catalog_requests: Mutex<HashMap<(String, String), usize>>,
    component_list_requests: Mutex<usize>,
    locale_list_requests: Mutex<usize>,
    seen_etags: Mutex<Vec<Option<String>>>,
    delay: Option<Duration>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every fetch, giving concurrent callers time to pile up.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn push_catalog(&self, locale: &str, component: &str, outcome: Scripted<MessageMap>) {
        self.catalogs
            .lock()
            .unwrap()
            .entry((locale.to_string(), component.to_string()))
            .or_default()
            .push_back(outcome);
    }

    pub fn push_component_list(&self, outcome: Scripted<Vec<Component>>) {
        self.component_lists.lock().unwrap().push_back(outcome);
    }

    pub fn push_locale_list(&self, outcome: Scripted<Vec<Locale>>) {
        self.locale_lists.lock().unwrap().push_back(outcome);
    }

    pub fn catalog_requests(&self, locale: &str, component: &str) -> usize {
        self.catalog_requests
            .lock()
            .unwrap()
            .get(&(locale.to_string(), component.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn component_list_requests(&self) -> usize {
        *self.component_list_requests.lock().unwrap()
    }

    pub fn locale_list_requests(&self) -> usize {
        *self.locale_list_requests.lock().unwrap()
    }

    /// Returns the conditional tokens observed, in fetch order.
    pub fn seen_etags(&self) -> Vec<Option<String>> {
        self.seen_etags.lock().unwrap().clone()
    }

    fn pause(&self) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl MessageSource for StubSource {
    fn fetch_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
        etag: Option<&str>,
    ) -> Result<SourceResponse<MessageMap>, FetchError> {
        self.pause();
        self.seen_etags.lock().unwrap().push(etag.map(str::to_string));
        let entry = (locale.as_str().to_string(), component.as_str().to_string());
        *self.catalog_requests.lock().unwrap().entry(entry.clone()).or_insert(0) += 1;
        self.catalogs
            .lock()
            .unwrap()
            .get_mut(&entry)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(FetchError::Status(404)))
    }

    fn fetch_component_list(
        &self,
        _etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Component>>, FetchError> {
        self.pause();
        *self.component_list_requests.lock().unwrap() += 1;
        self.component_lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Status(404)))
    }

    fn fetch_locale_list(
        &self,
        _etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Locale>>, FetchError> {
        self.pause();
        *self.locale_list_requests.lock().unwrap() += 1;
        self.locale_lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// Builds a message map from literal pairs.
pub fn message_map(pairs: &[(&str, &str)]) -> MessageMap {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Builds a message map of `count` entries whose values carry a tag.
pub fn numbered_map(count: usize, tag: &str) -> MessageMap {
    (0 .. count).map(|index| (format!("key.{index}"), format!("{tag} value {index}"))).collect()
}

/// Wraps a map in an updated response without a version token.
pub fn updated(messages: MessageMap) -> Scripted<MessageMap> {
    Ok(SourceResponse::Updated {
        value: messages,
        etag: None,
    })
}

/// Wraps a map in an updated response carrying a version token.
pub fn updated_with_etag(messages: MessageMap, etag: &str) -> Scripted<MessageMap> {
    Ok(SourceResponse::Updated {
        value: messages,
        etag: Some(etag.to_string()),
    })
}
