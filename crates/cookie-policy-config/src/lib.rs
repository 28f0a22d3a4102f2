// crates/cookie-policy-config/src/lib.rs
// ============================================================================
// Module: Cookie Policy Config Library
// Description: Canonical config model, validation, and registry assembly.
// Purpose: Single source of truth for cookie-policy.toml semantics.
// Dependencies: cookie-policy-core, cookie-policy-registry, serde, toml
// ============================================================================

//! ## Overview
//! `cookie-policy-config` defines the configuration model for cookie policy
//! registries. It provides strict, fail-closed validation and builds a
//! registry populated with the configured built-in cookie specs and wired to
//! the configured audit sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
