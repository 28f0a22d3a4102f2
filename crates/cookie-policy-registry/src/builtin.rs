// crates/cookie-policy-registry/src/builtin.rs
// ============================================================================
// Module: Built-in Cookie Specs
// Description: Standard cookie policies and their factories.
// Purpose: Provide the policies a freshly built registry is populated with.
// Dependencies: cookie-policy-core
// ============================================================================

//! ## Overview
//! Built-in policies cover the classic cookie standards plus a policy that
//! ignores cookies entirely. Handlers carry metadata and resolved settings
//! only; header parsing and matching are implemented elsewhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use cookie_policy_core::CookieSpec;
use cookie_policy_core::CookieSpecFactory;
use cookie_policy_core::CookieSpecSettings;
use cookie_policy_core::HeaderLine;
use cookie_policy_core::HttpParams;
use cookie_policy_core::PolicyName;
use cookie_policy_core::SpecError;
use cookie_policy_core::settings::PATTERN_ASCTIME;
use cookie_policy_core::settings::PATTERN_NETSCAPE;
use cookie_policy_core::settings::PATTERN_RFC1036;
use cookie_policy_core::settings::PATTERN_RFC1123;
use cookie_policy_core::settings::STANDARD_DATE_PATTERNS;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Date patterns accepted by the browser compatibility policy.
const COMPATIBILITY_DATE_PATTERNS: &[&str] = &[
    PATTERN_RFC1123,
    PATTERN_RFC1036,
    PATTERN_ASCTIME,
    "EEE, dd-MMM-yyyy HH:mm:ss z",
    "EEE, dd-MMM-yyyy HH-mm-ss z",
    "EEE, dd MMM yy HH:mm:ss z",
    "EEE dd-MMM-yyyy HH:mm:ss z",
    "EEE dd MMM yyyy HH:mm:ss z",
    "EEE dd-MMM-yyyy HH-mm-ss z",
    "EEE dd-MMM-yy HH:mm:ss z",
    "EEE dd MMM yy HH:mm:ss z",
    "EEE,dd-MMM-yy HH:mm:ss z",
    "EEE,dd-MMM-yyyy HH:mm:ss z",
    "EEE, dd-MM-yyyy HH:mm:ss z",
];

// ============================================================================
// SECTION: Built-in Policies
// ============================================================================

/// Built-in cookie policy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuiltinSpec {
    /// Lenient policy mimicking common browser behaviour.
    BrowserCompatibility,
    /// Original Netscape cookie draft.
    Netscape,
    /// RFC 2109 cookies.
    Rfc2109,
    /// RFC 2965 cookies (`Set-Cookie2`).
    Rfc2965,
    /// Policy that accepts and sends no cookies.
    IgnoreCookies,
}

impl BuiltinSpec {
    /// Every built-in policy in registration order.
    pub const ALL: [Self; 5] = [
        Self::BrowserCompatibility,
        Self::Netscape,
        Self::Rfc2109,
        Self::Rfc2965,
        Self::IgnoreCookies,
    ];

    /// Returns the canonical policy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BrowserCompatibility => "compatibility",
            Self::Netscape => "netscape",
            Self::Rfc2109 => "rfc2109",
            Self::Rfc2965 => "rfc2965",
            Self::IgnoreCookies => "ignoreCookies",
        }
    }

    /// Returns the case-folded registry key for this policy.
    #[must_use]
    pub fn policy_name(self) -> PolicyName {
        PolicyName::from_static(self.as_str())
    }

    /// Returns the cookie version emitted by this policy.
    #[must_use]
    pub const fn version(self) -> u32 {
        match self {
            Self::Rfc2109 | Self::Rfc2965 => 1,
            Self::BrowserCompatibility | Self::Netscape | Self::IgnoreCookies => 0,
        }
    }

    /// Returns the date patterns used when no pattern parameter is set.
    #[must_use]
    pub const fn default_date_patterns(self) -> &'static [&'static str] {
        match self {
            Self::BrowserCompatibility => COMPATIBILITY_DATE_PATTERNS,
            Self::Netscape => &[PATTERN_NETSCAPE],
            Self::Rfc2109 | Self::Rfc2965 | Self::IgnoreCookies => STANDARD_DATE_PATTERNS,
        }
    }
}

impl fmt::Display for BuiltinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name matches no built-in policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown built-in cookie spec: {0}")]
pub struct UnknownBuiltinSpec(pub String);

impl FromStr for BuiltinSpec {
    type Err = UnknownBuiltinSpec;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|spec| spec.as_str().to_lowercase() == folded)
            .ok_or_else(|| UnknownBuiltinSpec(value.to_string()))
    }
}

impl TryFrom<String> for BuiltinSpec {
    type Error = UnknownBuiltinSpec;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuiltinSpec> for String {
    fn from(value: BuiltinSpec) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Cookie spec handler for a built-in policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinCookieSpec {
    /// Policy implemented by this handler.
    spec: BuiltinSpec,
    /// Settings resolved from the construction parameters.
    settings: CookieSpecSettings,
}

impl BuiltinCookieSpec {
    /// Returns the built-in policy implemented by this handler.
    #[must_use]
    pub const fn spec(&self) -> BuiltinSpec {
        self.spec
    }
}

impl CookieSpec for BuiltinCookieSpec {
    fn name(&self) -> &str {
        self.spec.as_str()
    }

    fn version(&self) -> u32 {
        self.spec.version()
    }

    fn settings(&self) -> &CookieSpecSettings {
        &self.settings
    }

    fn version_header(&self) -> Option<HeaderLine> {
        match self.spec {
            BuiltinSpec::Rfc2965 => {
                Some(HeaderLine::new("Cookie2", format!("$Version={}", self.spec.version())))
            }
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Factory producing [`BuiltinCookieSpec`] handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSpecFactory {
    /// Policy this factory builds.
    spec: BuiltinSpec,
}

impl BuiltinSpecFactory {
    /// Creates a factory for `spec`.
    #[must_use]
    pub const fn new(spec: BuiltinSpec) -> Self {
        Self {
            spec,
        }
    }

    /// Builds a typed handler from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when a settings parameter is malformed.
    pub fn build(&self, params: Option<&HttpParams>) -> Result<BuiltinCookieSpec, SpecError> {
        let settings = if self.spec == BuiltinSpec::IgnoreCookies {
            CookieSpecSettings::with_patterns(self.spec.default_date_patterns())
        } else {
            CookieSpecSettings::resolve(params, self.spec.default_date_patterns())?
        };
        Ok(BuiltinCookieSpec {
            spec: self.spec,
            settings,
        })
    }
}

impl CookieSpecFactory for BuiltinSpecFactory {
    fn new_instance(&self, params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> {
        Ok(Box::new(self.build(params)?))
    }
}
