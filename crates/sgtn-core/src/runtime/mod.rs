// crates/sgtn-core/src/runtime/mod.rs
// ============================================================================
// Module: Singleton Runtime Services
// Description: Read-through data service and translation façade.
// Purpose: Orchestrate cache, synchronization, and source fetches for reads.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime services sit between the application and the data plane: the
//! [`service::DataService`] drives the read-through cache and refresh
//! discipline, and the [`translation::Translation`] façade applies the
//! locale fallback chain and argument substitution on top of it.

pub mod service;
pub mod translation;
