// crates/cookie-policy-registry/src/registry.rs
// ============================================================================
// Module: Cookie Policy Registry
// Description: Case-insensitive registry of cookie spec factories.
// Purpose: Resolve cookie spec handlers by policy name or parameter bag.
// Dependencies: cookie-policy-core, indexmap
// ============================================================================

//! ## Overview
//! The registry maps case-folded policy names to [`CookieSpecFactory`]
//! instances and builds [`CookieSpec`] handlers on demand. All access goes
//! through a single mutex per registry, so concurrent callers are serialized
//! and always observe a consistent map. Factories run while the lock is held;
//! a factory that blocks stalls every other registry call.
//!
//! There is no process-wide default registry. Callers construct one (empty,
//! or with [`CookiePolicyRegistry::with_builtin_specs`]) and pass it where it
//! is needed. Lookups never fall back to another registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use cookie_policy_core::CookieSpec;
use cookie_policy_core::CookieSpecFactory;
use cookie_policy_core::HttpParams;
use cookie_policy_core::PolicyName;
use cookie_policy_core::SpecError;
use cookie_policy_core::params;
use indexmap::IndexMap;
use thiserror::Error;

use crate::audit::NoopAuditSink;
use crate::audit::RegistryAction;
use crate::audit::RegistryAuditEvent;
use crate::audit::RegistryAuditSink;
use crate::builtin::BuiltinSpec;
use crate::builtin::BuiltinSpecFactory;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Cookie policy registry errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required argument was empty or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No factory is registered under the requested name.
    #[error("unsupported cookie spec: {0}")]
    NotFound(String),
    /// The factory failed to build the cookie spec.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl RegistryError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Spec(_) => "spec_construction",
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Shared factory handle stored by the registry.
type SharedFactory = Arc<dyn CookieSpecFactory>;

/// Case-insensitive cookie spec factory registry.
///
/// # Invariants
/// - Keys are case-folded [`PolicyName`] values.
/// - Enumeration follows first-registration order; re-registering a name
///   replaces its factory but keeps its position.
/// - Every operation holds the same lock for its whole duration.
pub struct CookiePolicyRegistry {
    /// Registered factories keyed by case-folded policy name.
    specs: Mutex<IndexMap<PolicyName, SharedFactory>>,
    /// Sink receiving one event per registry operation.
    audit: Arc<dyn RegistryAuditSink>,
}

impl CookiePolicyRegistry {
    /// Creates an empty registry that discards audit events.
    #[must_use]
    pub fn new() -> Self {
        Self::with_audit_sink(Arc::new(NoopAuditSink))
    }

    /// Creates an empty registry reporting to `audit`.
    #[must_use]
    pub fn with_audit_sink(audit: Arc<dyn RegistryAuditSink>) -> Self {
        Self {
            specs: Mutex::new(IndexMap::new()),
            audit,
        }
    }

    /// Creates a registry with every built-in cookie spec registered.
    #[must_use]
    pub fn with_builtin_specs() -> Self {
        let registry = Self::new();
        registry.register_builtin_specs();
        registry
    }

    /// Registers every built-in cookie spec in canonical order.
    pub fn register_builtin_specs(&self) {
        for spec in BuiltinSpec::ALL {
            self.register_builtin(spec);
        }
    }

    /// Registers a single built-in cookie spec under its canonical name.
    pub fn register_builtin(&self, spec: BuiltinSpec) {
        self.insert(spec.policy_name(), Arc::new(BuiltinSpecFactory::new(spec)));
    }

    /// Registers `factory` under `name`, replacing any existing factory with
    /// the same case-folded name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] when `name` is empty.
    pub fn register(
        &self,
        name: &str,
        factory: impl CookieSpecFactory + 'static,
    ) -> Result<(), RegistryError> {
        self.register_shared(name, Arc::new(factory))
    }

    /// Registers an already shared factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] when `name` is empty.
    pub fn register_shared(
        &self,
        name: &str,
        factory: Arc<dyn CookieSpecFactory>,
    ) -> Result<(), RegistryError> {
        let policy = self.parse_name(RegistryAction::Register, name)?;
        self.insert(policy, factory);
        Ok(())
    }

    /// Removes the factory registered under `name`.
    ///
    /// Returns whether a factory was removed; an unknown name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] when `name` is empty.
    pub fn unregister(&self, name: &str) -> Result<bool, RegistryError> {
        let policy = self.parse_name(RegistryAction::Unregister, name)?;
        let removed = self.entries().shift_remove(&policy).is_some();
        self.record(RegistryAction::Unregister, policy.as_str(), None);
        Ok(removed)
    }

    /// Builds the cookie spec registered under `name`, passing `params` to
    /// its factory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] when `name` is empty,
    /// [`RegistryError::NotFound`] when nothing is registered under it, and
    /// [`RegistryError::Spec`] when the factory fails.
    pub fn cookie_spec(
        &self,
        name: &str,
        params: Option<&HttpParams>,
    ) -> Result<Box<dyn CookieSpec>, RegistryError> {
        let policy = self.parse_name(RegistryAction::Lookup, name)?;
        let result = {
            let specs = self.entries();
            specs.get(&policy).map_or_else(
                || Err(RegistryError::NotFound(name.to_string())),
                |factory| factory.new_instance(params).map_err(RegistryError::from),
            )
        };
        let error_kind = result.as_ref().err().map(RegistryError::kind);
        self.record(RegistryAction::Lookup, policy.as_str(), error_kind);
        result
    }

    /// Builds the cookie spec named by the cookie policy parameter in
    /// `params`, passing `params` to its factory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] when the policy parameter is
    /// unset or not a string, otherwise the errors of
    /// [`CookiePolicyRegistry::cookie_spec`].
    pub fn cookie_spec_from_params(
        &self,
        params: &HttpParams,
    ) -> Result<Box<dyn CookieSpec>, RegistryError> {
        let name = match params::cookie_policy(params) {
            Ok(Some(name)) => name,
            Ok(None) => {
                return Err(self.reject(
                    RegistryAction::Lookup,
                    "",
                    format!("parameter {} is not set", params::COOKIE_POLICY),
                ));
            }
            Err(err) => return Err(self.reject(RegistryAction::Lookup, "", err.to_string())),
        };
        self.cookie_spec(name, Some(params))
    }

    /// Returns a snapshot of the registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries().keys().map(|name| name.as_str().to_string()).collect()
    }

    /// Returns true when a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        PolicyName::parse(name).is_some_and(|policy| self.entries().contains_key(&policy))
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true when no factory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Inserts a factory and records the registration.
    fn insert(&self, policy: PolicyName, factory: SharedFactory) {
        let label = policy.as_str().to_string();
        self.entries().insert(policy, factory);
        self.record(RegistryAction::Register, &label, None);
    }

    /// Case-folds `name`, recording and returning an error when it is empty.
    fn parse_name(&self, action: RegistryAction, name: &str) -> Result<PolicyName, RegistryError> {
        PolicyName::parse(name).ok_or_else(|| {
            self.reject(action, name, "cookie policy name may not be empty".to_string())
        })
    }

    /// Records an invalid-argument failure and returns the error.
    fn reject(&self, action: RegistryAction, policy: &str, message: String) -> RegistryError {
        let err = RegistryError::InvalidArgument(message);
        self.record(action, policy, Some(err.kind()));
        err
    }

    /// Emits an audit event. Called with the lock released.
    fn record(&self, action: RegistryAction, policy: &str, error_kind: Option<&'static str>) {
        self.audit.record(&RegistryAuditEvent::new(action, policy, error_kind));
    }

    /// Locks the factory map.
    ///
    /// Every mutation is a single map operation, so a poisoned lock still
    /// guards a consistent map and is recovered.
    fn entries(&self) -> MutexGuard<'_, IndexMap<PolicyName, SharedFactory>> {
        self.specs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CookiePolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CookiePolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookiePolicyRegistry").field("names", &self.names()).finish_non_exhaustive()
    }
}
