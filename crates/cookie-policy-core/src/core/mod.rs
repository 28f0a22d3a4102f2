// crates/cookie-policy-core/src/core/mod.rs
// ============================================================================
// Module: Cookie Policy Core Types
// Description: Policy names, parameter bags, and resolved spec settings.
// Purpose: Provide the shared data model for cookie policy registries.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types shared by registries, factories, and configuration loaders.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod params;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::InvalidPolicyName;
pub use identifiers::PolicyName;
pub use params::HttpParams;
pub use params::ParamsError;
pub use settings::CookieSpecSettings;
pub use settings::HeaderLine;
