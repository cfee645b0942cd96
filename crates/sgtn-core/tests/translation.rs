// crates/sgtn-core/tests/translation.rs
// ============================================================================
// Module: Translation Façade Tests
// Description: Locale fallback chain and echoed-key error behavior.
// ============================================================================

//! ## Overview
//! Tests for string resolution through the fallback chain: requested locale
//! first, default locale second, with the requested key echoed on every
//! failure path and error messages that distinguish missing keys from
//! missing components.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use sgtn_core::Component;
use sgtn_core::DataService;
use sgtn_core::FetchError;
use sgtn_core::Locale;
use sgtn_core::Translation;

use crate::common::StubSource;
use crate::common::message_map;
use crate::common::updated;

const TTL: Duration = Duration::from_secs(3600);

fn translation_over(stub: &Arc<StubSource>, default_locale: &str) -> Translation {
    let service = DataService::new(Arc::clone(stub) as Arc<dyn sgtn_core::MessageSource>, TTL);
    Translation::new(service, Locale::from(default_locale))
}

fn sunglow_catalog() -> Vec<(&'static str, &'static str)> {
    vec![
        ("application.title", "欢迎来到 Singleton 示例应用!"),
        ("application.description", "{0} 是一个通用库。"),
    ]
}

#[test]
fn string_lookup_returns_exact_translation() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "sunglow", updated(message_map(&sunglow_catalog())));
    let trans = translation_over(&stub, "fr");

    let text = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("sunglow"),
            "application.title",
            &[],
        )
        .unwrap();
    assert_eq!(text, "欢迎来到 Singleton 示例应用!");
}

#[test]
fn string_lookup_substitutes_arguments() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "sunglow", updated(message_map(&sunglow_catalog())));
    let trans = translation_over(&stub, "fr");

    let text = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("sunglow"),
            "application.description",
            &["MyArg"],
        )
        .unwrap();
    assert_eq!(text, "MyArg 是一个通用库。");
}

#[test]
fn missing_component_falls_back_to_default_locale() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "users", Err(FetchError::Status(404)));
    stub.push_catalog(
        "fr",
        "users",
        updated(message_map(&[(
            "Singleton.description",
            "{0} est une bibliothèque commune développée par G11n Team.",
        )])),
    );
    let trans = translation_over(&stub, "fr");

    let text = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("users"),
            "Singleton.description",
            &["MyArg"],
        )
        .unwrap();
    assert_eq!(text, "MyArg est une bibliothèque commune développée par G11n Team.");
}

#[test]
fn missing_key_echoes_and_names_the_requested_locale() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "sunglow", updated(message_map(&sunglow_catalog())));
    let trans = translation_over(&stub, "fr");

    let err = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("sunglow"),
            "nonexistent",
            &["MyArg"],
        )
        .unwrap_err();
    assert_eq!(err.display, "nonexistent");
    let message = err.to_string();
    assert!(message.contains("No key in"), "{message}");
    assert!(message.contains("zh-Hans"), "{message}");
    assert!(message.contains("sunglow"), "{message}");
}

#[test]
fn missing_key_in_default_locale_names_the_default() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "users", Err(FetchError::Status(404)));
    stub.push_catalog("fr", "users", updated(message_map(&[("other.key", "autre")])));
    let trans = translation_over(&stub, "fr");

    let err = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("users"),
            "nonexistent",
            &["MyArg"],
        )
        .unwrap_err();
    assert_eq!(err.display, "nonexistent");
    let message = err.to_string();
    assert!(message.contains("No key in"), "{message}");
    assert!(message.contains("fr"), "{message}");
    assert!(message.contains("users"), "{message}");
}

#[test]
fn component_missing_everywhere_is_not_a_key_error() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "comp-notexist", Err(FetchError::Status(404)));
    stub.push_catalog("fr", "comp-notexist", Err(FetchError::Status(404)));
    let trans = translation_over(&stub, "fr");

    let err = trans
        .get_string_message(
            &Locale::from("zh-Hans"),
            &Component::from("comp-notexist"),
            "MyKey",
            &["MyArg"],
        )
        .unwrap_err();
    assert_eq!(err.display, "MyKey");
    let message = err.to_string();
    assert!(!message.contains("No key in"), "{message}");
    assert!(message.contains("404"), "{message}");
}

#[test]
fn default_locale_request_with_missing_component_does_not_fall_back() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("fr", "comp-notexist", Err(FetchError::Status(404)));
    let trans = translation_over(&stub, "fr");

    let err = trans
        .get_string_message(
            &Locale::from("fr"),
            &Component::from("comp-notexist"),
            "MyKey",
            &["MyArg"],
        )
        .unwrap_err();
    assert_eq!(err.display, "MyKey");
    assert!(!err.to_string().contains("No key in"), "{err}");
    assert_eq!(stub.catalog_requests("fr", "comp-notexist"), 1);
}

#[test]
fn catalog_and_list_reads_pass_through() {
    let stub = Arc::new(StubSource::new());
    stub.push_catalog("zh-Hans", "sunglow", updated(message_map(&sunglow_catalog())));
    stub.push_component_list(Ok(sgtn_core::SourceResponse::Updated {
        value: vec![Component::from("sunglow"), Component::from("users")],
        etag: None,
    }));
    stub.push_locale_list(Ok(sgtn_core::SourceResponse::Updated {
        value: vec![Locale::from("fr"), Locale::from("zh-Hans")],
        etag: None,
    }));
    let trans = translation_over(&stub, "fr");

    let catalog = trans
        .get_component_messages(&Locale::from("zh-Hans"), &Component::from("sunglow"))
        .unwrap();
    assert_eq!(catalog.size(), 2);
    assert_eq!(trans.get_component_list().unwrap().len(), 2);
    assert_eq!(trans.get_locale_list().unwrap().len(), 2);
}
