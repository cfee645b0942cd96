// crates/sgtn-config/src/config.rs
// ============================================================================
// Module: Client Configuration
// Description: Configuration types, TOML loading, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: sgtn-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits. The
//! recognized options mirror the translation service semantics: the server
//! base URL, the fallback locale, the cache staleness threshold, and the
//! optional local bundle root. Missing or invalid configuration fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use sgtn_core::Locale;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "sgtn.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "SGTN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default cache staleness threshold in seconds.
pub const DEFAULT_CACHE_EXPIRED_SECS: u64 = 86_400;
/// Default HTTP request timeout in milliseconds.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5_000;
/// Minimum allowed HTTP request timeout in milliseconds.
pub(crate) const MIN_HTTP_TIMEOUT_MS: u64 = 100;
/// Maximum allowed HTTP request timeout in milliseconds.
pub(crate) const MAX_HTTP_TIMEOUT_MS: u64 = 60_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Singleton client configuration.
///
/// # Invariants
/// - At least one of `server_url` and `local_bundles` is set.
/// - `default_locale` is non-empty.
/// - `http.timeout_ms` lies within the allowed bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct SingletonConfig {
    /// Base URL of the translation server; `None` disables the remote source.
    #[serde(default)]
    pub server_url: Option<String>,
    /// Locale consulted by the fallback chain when the requested locale
    /// cannot resolve a key.
    pub default_locale: Locale,
    /// Cache staleness threshold in seconds.
    #[serde(default = "default_cache_expired_time")]
    pub cache_expired_time: u64,
    /// Root directory of pre-packaged translation bundles; `None` disables
    /// the local source.
    #[serde(default)]
    pub local_bundles: Option<PathBuf>,
    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpSettings,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in milliseconds, applied to the full lifecycle.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Application headers attached verbatim to every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            user_agent: default_user_agent(),
            headers: BTreeMap::new(),
        }
    }
}

fn default_cache_expired_time() -> u64 {
    DEFAULT_CACHE_EXPIRED_SECS
}

fn default_http_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_user_agent() -> String {
    concat!("sgtn-client/", env!("CARGO_PKG_VERSION")).to_string()
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl SingletonConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: the explicit path argument, the `SGTN_CONFIG`
    /// environment variable, then `sgtn.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|err| ConfigError::Parse(format!("config is not valid UTF-8: {err}")))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, failing closed on unusable settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no message source is configured,
    /// the default locale is empty, or the HTTP timeout is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.is_none() && self.local_bundles.is_none() {
            return Err(ConfigError::Invalid(
                "neither server_url nor local_bundles is configured".to_string(),
            ));
        }
        if let Some(url) = &self.server_url {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid("server_url is empty".to_string()));
            }
        }
        if self.default_locale.as_str().is_empty() {
            return Err(ConfigError::Invalid("default_locale is empty".to_string()));
        }
        if self.http.timeout_ms < MIN_HTTP_TIMEOUT_MS || self.http.timeout_ms > MAX_HTTP_TIMEOUT_MS
        {
            return Err(ConfigError::Invalid(format!(
                "http.timeout_ms {} outside [{MIN_HTTP_TIMEOUT_MS}, {MAX_HTTP_TIMEOUT_MS}]",
                self.http.timeout_ms
            )));
        }
        Ok(())
    }

    /// Returns the cache staleness threshold as a duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_expired_time)
    }
}

/// Resolves the configuration path from the argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(explicit) = path {
        return explicit.to_path_buf();
    }
    if let Ok(from_env) = env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(from_env);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("config io error: {0}")]
    Io(String),
    /// The configuration file is not valid TOML for the expected schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configuration parsed but is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}
