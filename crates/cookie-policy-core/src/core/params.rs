// crates/cookie-policy-core/src/core/params.rs
// ============================================================================
// Module: Cookie Policy Parameters
// Description: Key/value parameter bag consumed by cookie spec factories.
// Purpose: Carry policy selection and cookie spec settings between layers.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`HttpParams`] is an opaque string-keyed bag of JSON values. The registry
//! only reads it; factories pull their settings out through the typed
//! accessors below. Well-known cookie parameter names are exposed as
//! constants together with helper accessors such as [`cookie_policy`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Parameter Names
// ============================================================================

/// Parameter naming the cookie policy to select (string).
pub const COOKIE_POLICY: &str = "http.protocol.cookie-policy";
/// Parameter listing accepted cookie expiry date patterns (array of strings).
pub const DATE_PATTERNS: &str = "http.protocol.cookie-datepatterns";
/// Parameter forcing all cookies into a single request header (bool).
pub const SINGLE_COOKIE_HEADER: &str = "http.protocol.single-cookie-header";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Parameter access errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// Parameter exists but holds a value of the wrong JSON type.
    #[error("parameter {name} must be {expected}")]
    WrongType {
        /// Parameter name.
        name: String,
        /// Expected value type label.
        expected: &'static str,
    },
}

impl ParamsError {
    /// Builds a wrong-type error for `name`.
    fn wrong_type(name: &str, expected: &'static str) -> Self {
        Self::WrongType {
            name: name.to_string(),
            expected,
        }
    }
}

// ============================================================================
// SECTION: Parameter Bag
// ============================================================================

/// String-keyed parameter bag.
///
/// # Invariants
/// - Keys are stored verbatim; parameter names are case-sensitive.
/// - Iteration order is the lexical key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HttpParams {
    /// Parameter values keyed by parameter name.
    values: BTreeMap<String, Value>,
}

impl HttpParams {
    /// Creates an empty parameter bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns the bag with `name` set to `value`.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Sets `name` to `value`, returning the previous value if any.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Removes `name`, returning its value if it was set.
    pub fn remove_parameter(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Returns the raw value for `name`.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true when `name` is set (including explicit nulls).
    #[must_use]
    pub fn is_parameter_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns a string parameter. Null is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::WrongType`] when the value is not a string.
    pub fn string_parameter(&self, name: &str) -> Result<Option<&str>, ParamsError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(ParamsError::wrong_type(name, "a string")),
        }
    }

    /// Returns a boolean parameter. Null is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::WrongType`] when the value is not a boolean.
    pub fn bool_parameter(&self, name: &str) -> Result<Option<bool>, ParamsError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(ParamsError::wrong_type(name, "a boolean")),
        }
    }

    /// Returns a string-list parameter. Null is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::WrongType`] when the value is not an array of strings.
    pub fn string_list_parameter(&self, name: &str) -> Result<Option<Vec<String>>, ParamsError> {
        let items = match self.values.get(name) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(ParamsError::wrong_type(name, "an array of strings")),
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(value) => Ok(value.clone()),
                _ => Err(ParamsError::wrong_type(name, "an array of strings")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl<K, V> FromIterator<(K, V)> for HttpParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
        }
    }
}

// ============================================================================
// SECTION: Cookie Parameter Accessors
// ============================================================================

/// Returns the cookie policy name selected by `params`.
///
/// # Errors
///
/// Returns [`ParamsError`] when the policy parameter is not a string.
pub fn cookie_policy(params: &HttpParams) -> Result<Option<&str>, ParamsError> {
    params.string_parameter(COOKIE_POLICY)
}

/// Returns the configured cookie date patterns.
///
/// # Errors
///
/// Returns [`ParamsError`] when the parameter is not an array of strings.
pub fn date_patterns(params: &HttpParams) -> Result<Option<Vec<String>>, ParamsError> {
    params.string_list_parameter(DATE_PATTERNS)
}

/// Returns whether cookies must be sent in a single request header.
///
/// # Errors
///
/// Returns [`ParamsError`] when the parameter is not a boolean.
pub fn single_cookie_header(params: &HttpParams) -> Result<Option<bool>, ParamsError> {
    params.bool_parameter(SINGLE_COOKIE_HEADER)
}
