// crates/cookie-policy-registry/src/lib.rs
// ============================================================================
// Module: Cookie Policy Registry
// Description: Named cookie spec factory registry and built-in policies.
// Purpose: Select and construct cookie spec handlers by policy name.
// Dependencies: cookie-policy-core, indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate ships a case-insensitive registry of cookie spec factories,
//! the built-in cookie policies, and JSON-line audit sinks for registry
//! operations.
//! Invariants:
//! - Policy names are case-folded before storage and lookup.
//! - Every registry operation is serialized behind one lock per registry.
//! - There is no global registry; callers own and pass their instance.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod builtin;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RegistryAction;
pub use audit::RegistryAuditEvent;
pub use audit::RegistryAuditSink;
pub use audit::RegistryOutcome;
pub use audit::StderrAuditSink;
pub use builtin::BuiltinCookieSpec;
pub use builtin::BuiltinSpec;
pub use builtin::BuiltinSpecFactory;
pub use builtin::UnknownBuiltinSpec;
pub use registry::CookiePolicyRegistry;
pub use registry::RegistryError;
