// crates/cookie-policy-core/src/interfaces/mod.rs
// ============================================================================
// Module: Cookie Policy Interfaces
// Description: Cookie spec handler and factory contracts.
// Purpose: Define the surfaces a registry uses to build cookie spec handlers.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`CookieSpecFactory`] turns optional [`HttpParams`] into a boxed
//! [`CookieSpec`]. The registry treats both as opaque: it never inspects a
//! handler beyond returning it, and it shares factories across threads.
//! Plain closures with the right signature are factories too.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CookieSpecSettings;
use crate::core::HeaderLine;
use crate::core::HttpParams;
use crate::core::ParamsError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Cookie spec construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A parameter consumed by the factory was malformed.
    #[error("invalid cookie spec parameter: {0}")]
    Params(#[from] ParamsError),
    /// The factory rejected construction for another reason.
    #[error("cookie spec construction failed: {0}")]
    Construction(String),
}

// ============================================================================
// SECTION: Cookie Spec
// ============================================================================

/// Policy-specific cookie handler produced by a factory.
pub trait CookieSpec: Send + Sync {
    /// Returns the canonical policy name of this handler.
    fn name(&self) -> &str;

    /// Returns the cookie version this handler emits.
    fn version(&self) -> u32;

    /// Returns the settings the handler was built with.
    fn settings(&self) -> &CookieSpecSettings;

    /// Returns the header advertising the supported cookie version, if the
    /// policy sends one.
    fn version_header(&self) -> Option<HeaderLine> {
        None
    }
}

// ============================================================================
// SECTION: Cookie Spec Factory
// ============================================================================

/// Builds cookie spec handlers from optional parameters.
pub trait CookieSpecFactory: Send + Sync {
    /// Creates a new handler.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the parameters cannot be honoured.
    fn new_instance(&self, params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError>;
}

impl<F> CookieSpecFactory for F
where
    F: Fn(Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> + Send + Sync,
{
    fn new_instance(&self, params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> {
        self(params)
    }
}
