// crates/sgtn-remote/src/local.rs
// ============================================================================
// Module: Local Bundle Source
// Description: Message source reading pre-packaged bundles from disk.
// Purpose: Serve translations without a server behind the same contract.
// Dependencies: sgtn-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Local bundles lay out one directory per component holding one
//! `messages_<locale>.json` file per translated locale. The file body
//! carries the same `messages` object the server envelope does, so bundle
//! content classifies exactly like a remote response: a file without
//! `messages` is partial, a wrong-typed field is a decode error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use sgtn_core::Component;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::MessageMap;
use sgtn_core::MessageSource;
use sgtn_core::SourceResponse;

use crate::envelope::json_type_name;

// ============================================================================
// SECTION: Bundle File
// ============================================================================

/// One bundle file: the messages of one component in one locale.
#[derive(Debug, Deserialize)]
struct BundleFile {
    /// Message templates keyed by message key.
    #[serde(default)]
    messages: Option<Value>,
}

// ============================================================================
// SECTION: Local Source
// ============================================================================

/// Message source reading pre-packaged bundles from a directory tree.
#[derive(Debug, Clone)]
pub struct LocalSource {
    /// Bundle root directory.
    root: PathBuf,
}

impl LocalSource {
    /// Creates a local source over a bundle root directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
        }
    }

    /// Returns the bundle file path of one (locale, component).
    fn bundle_path(&self, locale: &Locale, component: &Component) -> PathBuf {
        self.root.join(component.as_str()).join(format!("messages_{locale}.json"))
    }
}

impl MessageSource for LocalSource {
    fn fetch_component_messages(
        &self,
        locale: &Locale,
        component: &Component,
        _etag: Option<&str>,
    ) -> Result<SourceResponse<MessageMap>, FetchError> {
        let path = self.bundle_path(locale, component);
        let body = fs::read_to_string(&path).map_err(|err| {
            FetchError::Transport(format!("bundle read failed for {}: {err}", path.display()))
        })?;
        let bundle: BundleFile =
            serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))?;
        let Some(raw) = bundle.messages else {
            return Ok(SourceResponse::Partial);
        };
        let Value::Object(entries) = raw else {
            return Err(FetchError::Decode(format!(
                "unconvertible type '{}' for field messages",
                json_type_name(&raw)
            )));
        };
        let mut messages = MessageMap::with_capacity(entries.len());
        for (key, value) in entries {
            let Value::String(template) = value else {
                return Err(FetchError::Decode(format!(
                    "unconvertible type '{}' for message '{key}'",
                    json_type_name(&value)
                )));
            };
            messages.insert(key, template);
        }
        Ok(SourceResponse::Updated {
            value: messages,
            etag: None,
        })
    }

    fn fetch_component_list(
        &self,
        _etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Component>>, FetchError> {
        let entries = fs::read_dir(&self.root).map_err(|err| {
            FetchError::Transport(format!(
                "bundle scan failed for {}: {err}",
                self.root.display()
            ))
        })?;
        let mut components = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                FetchError::Transport(format!("bundle scan failed: {err}"))
            })?;
            if entry.path().is_dir() {
                components.push(Component::from(entry.file_name().to_string_lossy().into_owned()));
            }
        }
        components.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(SourceResponse::Updated {
            value: components,
            etag: None,
        })
    }

    fn fetch_locale_list(
        &self,
        etag: Option<&str>,
    ) -> Result<SourceResponse<Vec<Locale>>, FetchError> {
        let SourceResponse::Updated {
            value: components, ..
        } = self.fetch_component_list(etag)?
        else {
            return Ok(SourceResponse::Partial);
        };
        let mut locales = BTreeSet::new();
        for component in &components {
            let dir = self.root.join(component.as_str());
            let entries = fs::read_dir(&dir).map_err(|err| {
                FetchError::Transport(format!("bundle scan failed for {}: {err}", dir.display()))
            })?;
            for entry in entries {
                let entry = entry.map_err(|err| {
                    FetchError::Transport(format!("bundle scan failed: {err}"))
                })?;
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(locale) = name
                    .strip_prefix("messages_")
                    .and_then(|rest| rest.strip_suffix(".json"))
                {
                    locales.insert(locale.to_string());
                }
            }
        }
        Ok(SourceResponse::Updated {
            value: locales.into_iter().map(Locale::from).collect(),
            etag: None,
        })
    }
}
