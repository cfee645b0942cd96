// crates/sgtn-config/src/lib.rs
// ============================================================================
// Module: Singleton Client Configuration
// Description: Public API surface for client configuration.
// Purpose: Expose configuration types and loading helpers.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration for the Singleton client is loaded from a TOML file with a
//! strict size limit and fail-closed validation: a config that cannot name a
//! usable message source or a fallback locale is rejected at load time
//! rather than producing a client that fails on first use.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::HttpSettings;
pub use config::SingletonConfig;
