// crates/sgtn-remote/src/envelope.rs
// ============================================================================
// Module: Response Envelope
// Description: Singleton server response envelope and classification.
// Purpose: Decode envelopes into classified source responses, fail closed.
// Dependencies: sgtn-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every Singleton server endpoint answers with the same JSON envelope: a
//! `response` status object and a `data` object whose fields depend on the
//! endpoint. A well-formed envelope missing the expected data field is a
//! partial response; a data field of the wrong JSON type is a decode error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;
use sgtn_core::Component;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::MessageMap;
use sgtn_core::SourceResponse;

// ============================================================================
// SECTION: Envelope Types
// ============================================================================

/// Singleton server response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    /// Business status of the response.
    #[expect(dead_code, reason = "Parsed to enforce the envelope schema.")]
    pub response: ResponseStatus,
    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: Option<EnvelopeData>,
    /// Optional payload signature; not verified by this client.
    #[serde(default)]
    #[expect(dead_code, reason = "Parsed to enforce the envelope schema.")]
    pub signature: Option<String>,
}

/// Business status carried inside the envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseStatus {
    /// Business status code.
    #[expect(dead_code, reason = "Parsed to enforce the envelope schema.")]
    pub code: i64,
    /// Optional status message.
    #[serde(default)]
    #[expect(dead_code, reason = "Parsed to enforce the envelope schema.")]
    pub message: Option<String>,
}

/// Endpoint-specific payload fields.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnvelopeData {
    /// Component messages, present on the component-messages endpoint.
    #[serde(default)]
    pub messages: Option<Value>,
    /// Component names, present on the component-list endpoint.
    #[serde(default)]
    pub components: Option<Vec<String>>,
    /// Locale identifiers, present on the locale-list endpoint.
    #[serde(default)]
    pub locales: Option<Vec<String>>,
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Parses an envelope from a response body.
pub(crate) fn parse(body: &str) -> Result<Envelope, FetchError> {
    serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))
}

/// Classifies a component-messages envelope.
pub(crate) fn catalog_response(
    envelope: Envelope,
    etag: Option<String>,
) -> Result<SourceResponse<MessageMap>, FetchError> {
    let Some(raw) = envelope.data.and_then(|data| data.messages) else {
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
        etag,
    })
}

/// Classifies a component-list envelope.
pub(crate) fn component_list_response(
    envelope: Envelope,
    etag: Option<String>,
) -> Result<SourceResponse<Vec<Component>>, FetchError> {
    let Some(names) = envelope.data.and_then(|data| data.components) else {
        return Ok(SourceResponse::Partial);
    };
    Ok(SourceResponse::Updated {
        value: names.into_iter().map(Component::from).collect(),
        etag,
    })
}

/// Classifies a locale-list envelope.
pub(crate) fn locale_list_response(
    envelope: Envelope,
    etag: Option<String>,
) -> Result<SourceResponse<Vec<Locale>>, FetchError> {
    let Some(locales) = envelope.data.and_then(|data| data.locales) else {
        return Ok(SourceResponse::Partial);
    };
    Ok(SourceResponse::Updated {
        value: locales.into_iter().map(Locale::from).collect(),
        etag,
    })
}

/// Returns the JSON type name used in decode error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
