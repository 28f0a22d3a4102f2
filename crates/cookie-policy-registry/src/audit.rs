// crates/cookie-policy-registry/src/audit.rs
// ============================================================================
// Module: Registry Audit Logging
// Description: Structured audit events for cookie policy registry operations.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every registry mutation and lookup produces one [`RegistryAuditEvent`].
//! Sinks decide where the event goes; the stderr and file sinks write one
//! JSON object per line so deployments can route events into their own
//! logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Registry operation recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    /// Factory registration.
    Register,
    /// Factory removal.
    Unregister,
    /// Cookie spec lookup and construction.
    Lookup,
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryOutcome {
    /// Operation succeeded.
    Ok,
    /// Operation failed.
    Error,
}

/// Registry audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation performed.
    pub action: RegistryAction,
    /// Case-folded policy name, or the raw input when it was rejected.
    pub policy: String,
    /// Operation outcome.
    pub outcome: RegistryOutcome,
    /// Normalized error kind label when the operation failed.
    pub error_kind: Option<&'static str>,
}

impl RegistryAuditEvent {
    /// Creates an audit event stamped with the current time.
    #[must_use]
    pub fn new(
        action: RegistryAction,
        policy: impl Into<String>,
        error_kind: Option<&'static str>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome =
            if error_kind.is_some() { RegistryOutcome::Error } else { RegistryOutcome::Ok };
        Self {
            event: "cookie_policy_registry",
            timestamp_ms,
            action,
            policy: policy.into(),
            outcome,
            error_kind,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for registry events.
pub trait RegistryAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RegistryAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl RegistryAuditSink for StderrAuditSink {
    fn record(&self, event: &RegistryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RegistryAuditSink for FileAuditSink {
    fn record(&self, event: &RegistryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl RegistryAuditSink for NoopAuditSink {
    fn record(&self, _event: &RegistryAuditEvent) {}
}
