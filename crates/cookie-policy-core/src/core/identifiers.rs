// crates/cookie-policy-core/src/core/identifiers.rs
// ============================================================================
// Module: Cookie Policy Identifiers
// Description: Case-folded policy names used as registry keys.
// Purpose: Guarantee case-insensitive registration and lookup by construction.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`PolicyName`] is the registry key for a cookie policy. Names are
//! lower-cased once at construction, so two names compare equal whenever the
//! caller-supplied strings differ only in case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Case-folded cookie policy name.
///
/// # Invariants
/// - Never empty. Whitespace is significant and kept as supplied.
/// - Always lower-case; the original spelling is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PolicyName(String);

impl PolicyName {
    /// Creates a policy name by lower-casing `raw`.
    ///
    /// Returns `None` when `raw` is empty.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self(raw.to_lowercase()))
    }

    /// Creates a policy name from a compile-time literal.
    ///
    /// Used for names fixed in code, such as built-in policies, where the
    /// literal is known to be non-empty.
    #[must_use]
    pub fn from_static(name: &'static str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the case-folded name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name and returns the case-folded string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for PolicyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PolicyName {
    type Error = InvalidPolicyName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(InvalidPolicyName)
    }
}

impl From<PolicyName> for String {
    fn from(value: PolicyName) -> Self {
        value.0
    }
}

/// Error returned when a policy name is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cookie policy name must be non-empty")]
pub struct InvalidPolicyName;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions are permitted."
)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_mixed_case_names() {
        let name = PolicyName::parse("RFC2965").unwrap();
        assert_eq!(name.as_str(), "rfc2965");
        assert_eq!(PolicyName::parse("rFc2965").unwrap(), name);
    }

    #[test]
    fn parse_rejects_only_empty_names() {
        assert!(PolicyName::parse("").is_none());
        assert_eq!(PolicyName::parse("   ").unwrap().as_str(), "   ");
        assert_eq!(PolicyName::parse(" Rfc2109\t").unwrap().as_str(), " rfc2109\t");
    }

    #[test]
    fn from_static_folds_like_parse() {
        let parsed = PolicyName::parse("IGNORECOOKIES").unwrap();
        assert_eq!(PolicyName::from_static("ignoreCookies"), parsed);
    }

    #[test]
    fn deserialize_folds_case_and_rejects_empty() {
        let name: PolicyName = serde_json::from_str("\"IgnoreCookies\"").unwrap();
        assert_eq!(name.as_str(), "ignorecookies");
        assert!(serde_json::from_str::<PolicyName>("\"\"").is_err());
    }
}
