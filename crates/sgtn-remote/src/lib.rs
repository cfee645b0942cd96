// crates/sgtn-remote/src/lib.rs
// ============================================================================
// Module: Singleton Message Sources
// Description: Built-in message sources for the Singleton client.
// Purpose: Provide remote HTTP and local-bundle sources behind the core seam.
// Dependencies: sgtn-core, sgtn-config, reqwest, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the message sources the client wires behind the
//! [`sgtn_core::MessageSource`] contract: [`HttpSource`] fetches catalogs
//! from a Singleton translation server with conditional requests, and
//! [`LocalSource`] reads pre-packaged bundles from disk. Both classify their
//! outcomes identically, so the data service treats them interchangeably.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod envelope;
pub mod http;
pub mod local;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpSource;
pub use http::HttpSourceConfig;
pub use local::LocalSource;
