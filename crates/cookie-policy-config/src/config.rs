// crates/cookie-policy-config/src/config.rs
// ============================================================================
// Module: Cookie Policy Configuration
// Description: Configuration loading and validation for cookie policy registries.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: cookie-policy-core, cookie-policy-registry, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits
//! and then turned into a ready [`CookiePolicyRegistry`]. Missing or invalid
//! configuration fails closed rather than falling back to defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use cookie_policy_core::CookieSpecSettings;
use cookie_policy_core::HttpParams;
use cookie_policy_core::PolicyName;
use cookie_policy_core::params;
use cookie_policy_registry::BuiltinSpec;
use cookie_policy_registry::CookiePolicyRegistry;
use cookie_policy_registry::FileAuditSink;
use cookie_policy_registry::NoopAuditSink;
use cookie_policy_registry::RegistryAuditSink;
use cookie_policy_registry::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "cookie-policy.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "COOKIE_POLICY_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Cookie policy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CookiePolicyConfig {
    /// Registry population settings.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Default parameters handed to cookie spec factories.
    #[serde(default)]
    pub params: HttpParams,
    /// Audit sink configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl CookiePolicyConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enabled = self.registry.enabled_builtins()?;
        self.audit.validate()?;
        validate_params(&self.params, &enabled)
    }

    /// Returns the default parameters for cookie spec lookups.
    #[must_use]
    pub const fn default_params(&self) -> &HttpParams {
        &self.params
    }

    /// Builds a registry with the configured built-ins and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the audit sink cannot
    /// be opened.
    pub fn build_registry(&self) -> Result<CookiePolicyRegistry, ConfigError> {
        let enabled = self.registry.enabled_builtins()?;
        let registry = CookiePolicyRegistry::with_audit_sink(self.audit.build_sink()?);
        for spec in enabled {
            registry.register_builtin(spec);
        }
        Ok(registry)
    }
}

/// Registry population configuration.
///
/// # Invariants
/// - `builtins` names are unique after case folding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Built-in cookie specs to register, in registration order.
    #[serde(default = "default_builtins")]
    pub builtins: Vec<String>,
}

impl RegistryConfig {
    /// Resolves the configured built-in names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown or duplicate names.
    pub fn enabled_builtins(&self) -> Result<Vec<BuiltinSpec>, ConfigError> {
        let mut enabled = Vec::with_capacity(self.builtins.len());
        for name in &self.builtins {
            let spec: BuiltinSpec = name
                .parse()
                .map_err(|err| ConfigError::Invalid(format!("registry.builtins: {err}")))?;
            if enabled.contains(&spec) {
                return Err(ConfigError::Invalid(format!(
                    "registry.builtins: duplicate entry {name}"
                )));
            }
            enabled.push(spec);
        }
        Ok(enabled)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: default_builtins(),
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit sink configuration.
///
/// # Invariants
/// - `path` is set exactly when `sink` is [`AuditSinkKind::File`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink receiving registry audit events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path for file sinks.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the sink and path disagree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for file sinks".to_string()))
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid with sink = \"file\"".to_string(),
            )),
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the audit
    /// file cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn RegistryAuditSink>, ConfigError> {
        self.validate()?;
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => {
                let sink = FileAuditSink::new(path)
                    .map_err(|err| ConfigError::Io(format!("audit log: {err}")))?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            _ => Ok(Arc::new(NoopAuditSink)),
        }
    }
}

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns every built-in name in registration order.
fn default_builtins() -> Vec<String> {
    BuiltinSpec::ALL.iter().map(|spec| spec.as_str().to_string()).collect()
}

/// Validates default parameters against the enabled built-ins.
fn validate_params(params: &HttpParams, enabled: &[BuiltinSpec]) -> Result<(), ConfigError> {
    CookieSpecSettings::resolve(Some(params), &[])
        .map_err(|err| ConfigError::Invalid(format!("params: {err}")))?;
    let policy = params::cookie_policy(params)
        .map_err(|err| ConfigError::Invalid(format!("params: {err}")))?;
    let Some(policy) = policy else {
        return Ok(());
    };
    let Some(name) = PolicyName::parse(policy) else {
        return Err(ConfigError::Invalid(format!(
            "params: {} must not be empty",
            params::COOKIE_POLICY
        )));
    };
    if enabled.iter().any(|spec| spec.policy_name() == name) {
        return Ok(());
    }
    Err(ConfigError::Invalid(format!(
        "params: {} names {policy}, which is not an enabled built-in",
        params::COOKIE_POLICY
    )))
}

/// Resolves the config path from caller input or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

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
    fn validate_path_string_rejects_whitespace_only() {
        let result = validate_path_string("audit.path", "   ");
        assert!(result.unwrap_err().to_string().contains("non-empty"));
    }

    #[test]
    fn validate_path_string_rejects_component_too_long() {
        let path = format!("./{}", "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        let result = validate_path_string("audit.path", &path);
        assert!(result.unwrap_err().to_string().contains("component too long"));
    }

    #[test]
    fn validate_path_rejects_exceeds_max_length() {
        let path = PathBuf::from("a/".repeat(MAX_TOTAL_PATH_LENGTH));
        assert!(validate_path(&path).is_err());
    }

    #[test]
    fn resolve_path_prefers_explicit_path() {
        let explicit = Path::new("custom.toml");
        assert_eq!(resolve_path(Some(explicit)).unwrap(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn default_builtins_cover_all_specs() {
        assert_eq!(default_builtins().len(), BuiltinSpec::ALL.len());
        assert_eq!(default_builtins()[0], "compatibility");
    }
}
