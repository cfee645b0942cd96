// crates/sgtn-remote/src/http.rs
// ============================================================================
// Module: HTTP Message Source
// Description: Remote source fetching catalogs from a Singleton server.
// Purpose: Issue bounded conditional GETs and classify their responses.
// Dependencies: sgtn-core, sgtn-config, reqwest, url
// ============================================================================

//! ## Overview
//! The HTTP source issues GET requests against the configured server base
//! URL and decodes the Singleton response envelope. Requests carry the
//! application header map verbatim plus `If-None-Match` when a version token
//! is known; HTTP 304 classifies as not-modified. The configured timeout
//! applies to the full request lifecycle, so no read blocks longer than the
//! transport allows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header;
use sgtn_config::SingletonConfig;
use sgtn_core::Component;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::MessageMap;
use sgtn_core::MessageSource;
use sgtn_core::SourceResponse;
use url::Url;

use crate::envelope;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP source.
///
/// # Invariants
/// - `server_url` must carry an `http` or `https` scheme; anything else
///   fails each fetch with a transport error.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Base URL of the translation server.
    pub server_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Application headers attached verbatim to every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            timeout_ms: 5_000,
            user_agent: concat!("sgtn-client/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: HTTP Source
// ============================================================================

/// Remote message source backed by a Singleton translation server.
pub struct HttpSource {
    /// Server base URL, parsed and validated per request.
    server_url: String,
    /// HTTP client used for outbound requests.
    client: Client,
    /// Application header map; request construction snapshots it.
    headers: RwLock<BTreeMap<String, String>>,
}

impl HttpSource {
    /// Creates an HTTP source with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| FetchError::Transport(format!("http client build failed: {err}")))?;
        Ok(Self {
            server_url: config.server_url,
            client,
            headers: RwLock::new(config.default_headers),
        })
    }

    /// Creates an HTTP source from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when no server URL is configured or
    /// the HTTP client cannot be built.
    pub fn from_config(config: &SingletonConfig) -> Result<Self, FetchError> {
        let server_url = config
            .server_url
            .clone()
            .ok_or_else(|| FetchError::Transport("no server url configured".to_string()))?;
        Self::new(HttpSourceConfig {
            server_url,
            timeout_ms: config.http.timeout_ms,
            user_agent: config.http.user_agent.clone(),
            default_headers: config.http.headers.clone(),
        })
    }

    /// Merges application headers into the header map.
    ///
    /// Headers attach verbatim to every subsequent request; an in-flight
    /// request keeps the snapshot it took at construction.
    pub fn add_http_headers(&self, headers: BTreeMap<String, String>) {
        self.headers.write().unwrap_or_else(PoisonError::into_inner).extend(headers);
    }

    /// Composes an endpoint URL from the base URL and path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = match Url::parse(&self.server_url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(FetchError::Transport(format!(
                    "unsupported protocol scheme in server url \"{}\"",
                    self.server_url
                )));
            }
            Err(err) => {
                return Err(FetchError::Transport(format!("invalid server url: {err}")));
            }
        };
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FetchError::Transport(format!(
                    "unsupported protocol scheme \"{other}\""
                )));
            }
        }
        url.path_segments_mut()
            .map_err(|()| FetchError::Transport("server url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET with the application header snapshot and optional
    /// conditional header.
    fn send(&self, url: Url, etag: Option<&str>) -> Result<Response, FetchError> {
        let snapshot = self.headers.read().unwrap_or_else(PoisonError::into_inner).clone();
        let mut request = self.client.get(url);
        for (name, value) in &snapshot {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(tag) = etag {
            request = request.header(header::IF_NONE_MATCH, tag);
        }
        request.send().map_err(|err| FetchError::Transport(err.to_string()))
    }

    /// Performs one fetch and hands successful bodies to the classifier.
    fn fetch<T>(
        &self,
        segments: &[&str],
        etag: Option<&str>,
        classify: impl FnOnce(envelope::Envelope, Option<String>) -> Result<SourceResponse<T>, FetchError>,
    ) -> Result<SourceResponse<T>, FetchError> {
        let url = self.endpoint(segments)?;
        let response = self.send(url, etag)?;
        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            return Ok(SourceResponse::NotModified {
                etag: response_etag(&response),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let new_etag = response_etag(&response);
        let body =
            response.text().map_err(|err| FetchError::Transport(err.to_string()))?;
        classify(envelope::parse(&body)?, new_etag)
    }
}

impl MessageSource for HttpSource {
    fn fetch_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
        etag: Option<&str>,
    ) -> Result<SourceResponse<MessageMap>, FetchError> {
        self.fetch(
            &["locales", locale.as_str(), "components", component.as_str()],
            etag,
            envelope::catalog_response,
        )
    }

    fn fetch_component_list(
        &self,
        etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Component>>, FetchError> {
        self.fetch(&["components"], etag, envelope::component_list_response)
    }

    fn fetch_locale_list(
        &self,
        etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Locale>>, FetchError> {
        self.fetch(&["locales"], etag, envelope::locale_list_response)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the version token from a response, when present.
fn response_etag(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::ETAG)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
