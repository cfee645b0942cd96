// crates/sgtn-remote/tests/local_bundles.rs
// ============================================================================
// Module: Local Bundle Source Tests
// Description: Bundle layout reading and offline client operation.
// ============================================================================

//! ## Overview
//! Tests for the local bundle source: file layout resolution, response
//! classification parity with the remote source, and driving the full
//! client stack without a server.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use sgtn_core::Component;
use sgtn_core::DataService;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::MessageSource;
use sgtn_core::SourceResponse;
use sgtn_core::Translation;
use sgtn_remote::LocalSource;
use tempfile::TempDir;

fn write_bundle(root: &TempDir, component: &str, locale: &str, body: &str) {
    let dir = root.path().join(component);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("messages_{locale}.json")), body).unwrap();
}

fn sample_bundles() -> TempDir {
    let root = TempDir::new().unwrap();
    write_bundle(
        &root,
        "sunglow",
        "zh-Hans",
        r#"{
            "component": "sunglow",
            "locale": "zh-Hans",
            "messages": {
                "application.title": "欢迎来到 Singleton 示例应用!",
                "application.description": "{0} 是一个通用库。"
            }
        }"#,
    );
    write_bundle(
        &root,
        "users",
        "fr",
        r#"{
            "component": "users",
            "locale": "fr",
            "messages": {
                "Singleton.description":
                    "{0} est une bibliothèque commune développée par G11n Team."
            }
        }"#,
    );
    root
}

#[test]
fn bundle_file_decodes_into_a_catalog() {
    let root = sample_bundles();
    let source = LocalSource::new(root.path().to_path_buf());

    let response = source
        .fetch_component_messages(&Locale::from("zh-Hans"), &Component::from("sunglow"), None)
        .unwrap();
    let SourceResponse::Updated {
        value,
        etag,
    } = response
    else {
        panic!("expected updated response");
    };
    assert_eq!(value.len(), 2);
    assert_eq!(
        value.get("application.title").map(String::as_str),
        Some("欢迎来到 Singleton 示例应用!")
    );
    assert_eq!(etag, None);
}

#[test]
fn missing_bundle_is_a_transport_error() {
    let root = sample_bundles();
    let source = LocalSource::new(root.path().to_path_buf());

    let err = source
        .fetch_component_messages(&Locale::from("de"), &Component::from("sunglow"), None)
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().contains("bundle read failed"), "{err}");
}

#[test]
fn bundle_without_messages_is_partial() {
    let root = TempDir::new().unwrap();
    write_bundle(&root, "sunglow", "zh-Hans", r#"{"component": "sunglow"}"#);
    let source = LocalSource::new(root.path().to_path_buf());

    let response = source
        .fetch_component_messages(&Locale::from("zh-Hans"), &Component::from("sunglow"), None)
        .unwrap();
    assert_eq!(response, SourceResponse::Partial);
}

#[test]
fn bundle_with_wrong_messages_type_is_a_decode_error() {
    let root = TempDir::new().unwrap();
    write_bundle(&root, "sunglow", "zh-Hans", r#"{"messages": "oops"}"#);
    let source = LocalSource::new(root.path().to_path_buf());

    let err = source
        .fetch_component_messages(&Locale::from("zh-Hans"), &Component::from("sunglow"), None)
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
    assert!(err.to_string().contains("unconvertible type 'string'"), "{err}");
}

#[test]
fn component_list_reflects_bundle_directories() {
    let root = sample_bundles();
    let source = LocalSource::new(root.path().to_path_buf());

    let response = source.fetch_component_list(None).unwrap();
    let SourceResponse::Updated {
        value, ..
    } = response
    else {
        panic!("expected updated response");
    };
    let names: Vec<&str> = value.iter().map(Component::as_str).collect();
    assert_eq!(names, vec!["sunglow", "users"]);
}

#[test]
fn locale_list_collects_locales_across_components() {
    let root = sample_bundles();
    write_bundle(&root, "sunglow", "fr", r#"{"messages": {}}"#);
    let source = LocalSource::new(root.path().to_path_buf());

    let response = source.fetch_locale_list(None).unwrap();
    let SourceResponse::Updated {
        value, ..
    } = response
    else {
        panic!("expected updated response");
    };
    let names: Vec<&str> = value.iter().map(Locale::as_str).collect();
    assert_eq!(names, vec!["fr", "zh-Hans"]);
}

#[test]
fn client_stack_runs_offline_over_bundles() {
    let root = sample_bundles();
    let source = LocalSource::new(root.path().to_path_buf());
    let service =
        DataService::new(Arc::new(source) as Arc<dyn MessageSource>, Duration::from_secs(3600));
    let translation = Translation::new(service, Locale::from("fr"));

    let text = translation
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("users"),
            "Singleton.description",
            &["MyArg"],
        )
        .unwrap();
    assert_eq!(text, "MyArg est une bibliothèque commune développée par G11n Team.");
}
