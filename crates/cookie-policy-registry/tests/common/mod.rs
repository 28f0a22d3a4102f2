// crates/cookie-policy-registry/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared factories and handlers for registry tests.
// Purpose: Identify which factory built a handler and how often it ran.
// Dependencies: cookie-policy-core
// ============================================================================

//! ## Overview
//! [`TaggedFactory`] builds [`TaggedSpec`] handlers whose name is the tag the
//! factory was created with, so tests can tell factories apart through the
//! opaque [`CookieSpec`] interface.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use cookie_policy_core::CookieSpec;
use cookie_policy_core::CookieSpecFactory;
use cookie_policy_core::CookieSpecSettings;
use cookie_policy_core::HttpParams;
use cookie_policy_core::SpecError;
use cookie_policy_core::settings::STANDARD_DATE_PATTERNS;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// Handler whose name identifies the factory that built it.
pub struct TaggedSpec {
    /// Factory tag.
    tag: String,
    /// Settings resolved from the construction parameters.
    settings: CookieSpecSettings,
}

impl CookieSpec for TaggedSpec {
    fn name(&self) -> &str {
        &self.tag
    }

    fn version(&self) -> u32 {
        0
    }

    fn settings(&self) -> &CookieSpecSettings {
        &self.settings
    }
}

/// Factory producing [`TaggedSpec`] handlers and counting invocations.
#[derive(Clone)]
pub struct TaggedFactory {
    /// Tag stamped on every handler.
    tag: String,
    /// Number of handlers built.
    calls: Arc<AtomicU32>,
}

impl TaggedFactory {
    /// Creates a factory with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Returns how many handlers this factory (or a clone) has built.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CookieSpecFactory for TaggedFactory {
    fn new_instance(&self, params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let settings = CookieSpecSettings::resolve(params, STANDARD_DATE_PATTERNS)?;
        Ok(Box::new(TaggedSpec {
            tag: self.tag.clone(),
            settings,
        }))
    }
}

/// Factory that sleeps while building and records how many invocations
/// were in flight at once.
#[derive(Clone)]
pub struct OverlapTrackingFactory {
    /// Time spent inside each invocation.
    delay: Duration,
    /// Invocations currently running.
    active: Arc<AtomicU32>,
    /// Highest number of simultaneous invocations observed.
    peak: Arc<AtomicU32>,
    /// Number of handlers built.
    calls: Arc<AtomicU32>,
}

impl OverlapTrackingFactory {
    /// Creates a factory that holds each invocation open for `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: Arc::new(AtomicU32::new(0)),
            peak: Arc::new(AtomicU32::new(0)),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Returns the highest number of overlapping invocations seen.
    pub fn peak_active(&self) -> u32 {
        self.peak.load(Ordering::SeqCst)
    }

    /// Returns how many handlers this factory (or a clone) has built.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CookieSpecFactory for OverlapTrackingFactory {
    fn new_instance(&self, params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> {
        let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        let settings = CookieSpecSettings::resolve(params, STANDARD_DATE_PATTERNS)?;
        Ok(Box::new(TaggedSpec {
            tag: "slow".to_string(),
            settings,
        }))
    }
}

/// Factory that always fails construction.
pub fn failing_factory(_params: Option<&HttpParams>) -> Result<Box<dyn CookieSpec>, SpecError> {
    Err(SpecError::Construction("factory disabled".to_string()))
}
