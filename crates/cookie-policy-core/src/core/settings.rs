// crates/cookie-policy-core/src/core/settings.rs
// ============================================================================
// Module: Cookie Spec Settings
// Description: Settings a cookie spec resolves from its parameters.
// Purpose: Share parameter resolution between cookie spec factories.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Cookie spec factories resolve [`CookieSpecSettings`] from optional
//! [`HttpParams`], falling back to per-spec defaults when a parameter is unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::params;
use crate::core::params::HttpParams;
use crate::core::params::ParamsError;

// ============================================================================
// SECTION: Date Patterns
// ============================================================================

/// RFC 1123 date pattern.
pub const PATTERN_RFC1123: &str = "EEE, dd MMM yyyy HH:mm:ss zzz";
/// RFC 1036 date pattern.
pub const PATTERN_RFC1036: &str = "EEEE, dd-MMM-yy HH:mm:ss zzz";
/// ANSI C `asctime()` date pattern.
pub const PATTERN_ASCTIME: &str = "EEE MMM d HH:mm:ss yyyy";
/// Netscape cookie draft expiry pattern.
pub const PATTERN_NETSCAPE: &str = "EEE, dd-MMM-yy HH:mm:ss z";

/// Date patterns used when no pattern parameter is set.
pub const STANDARD_DATE_PATTERNS: &[&str] = &[PATTERN_RFC1123, PATTERN_RFC1036, PATTERN_ASCTIME];

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Resolved cookie spec settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSpecSettings {
    /// Accepted cookie expiry date patterns, in preference order.
    pub date_patterns: Vec<String>,
    /// Whether all cookies are sent in a single request header.
    pub single_cookie_header: bool,
}

impl CookieSpecSettings {
    /// Resolves settings from `params`, using `default_patterns` when the
    /// date pattern parameter is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError`] when a setting parameter has the wrong type.
    pub fn resolve(
        params: Option<&HttpParams>,
        default_patterns: &[&str],
    ) -> Result<Self, ParamsError> {
        let mut settings = Self::with_patterns(default_patterns);
        let Some(params) = params else {
            return Ok(settings);
        };
        if let Some(patterns) = params::date_patterns(params)? {
            settings.date_patterns = patterns;
        }
        if let Some(single) = params::single_cookie_header(params)? {
            settings.single_cookie_header = single;
        }
        Ok(settings)
    }

    /// Builds settings with the given patterns and separate cookie headers.
    #[must_use]
    pub fn with_patterns(patterns: &[&str]) -> Self {
        Self {
            date_patterns: patterns.iter().map(ToString::to_string).collect(),
            single_cookie_header: false,
        }
    }
}

impl Default for CookieSpecSettings {
    fn default() -> Self {
        Self::with_patterns(STANDARD_DATE_PATTERNS)
    }
}

// ============================================================================
// SECTION: Header Line
// ============================================================================

/// A single HTTP header name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLine {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl HeaderLine {
    /// Creates a header line.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
