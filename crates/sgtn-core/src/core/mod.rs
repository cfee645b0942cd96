// crates/sgtn-core/src/core/mod.rs
// ============================================================================
// Module: Singleton Core Types
// Description: Catalog, cache, and synchronization building blocks.
// Purpose: Group the data-plane types shared by the runtime services.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! Core types for the translation data service: opaque identifiers, the
//! immutable message catalog, the thread-safe cache store, and the per-entry
//! synchronization records that coordinate refreshes.

pub mod cache;
pub mod catalog;
pub mod identifiers;
pub mod sync;
