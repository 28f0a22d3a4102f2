// crates/cookie-policy-core/src/lib.rs
// ============================================================================
// Module: Cookie Policy Core Library
// Description: Public API surface for the cookie policy core.
// Purpose: Expose core types and the cookie spec interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Cookie policy core defines the data model shared by cookie policy
//! registries: case-folded policy names, the parameter bag consumed by cookie
//! spec factories, and the handler/factory contracts themselves. Cookie
//! parsing and matching live elsewhere; this crate only describes how a
//! handler is selected and constructed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::CookieSpec;
pub use interfaces::CookieSpecFactory;
pub use interfaces::SpecError;
