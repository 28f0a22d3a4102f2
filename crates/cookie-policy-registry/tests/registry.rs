// crates/cookie-policy-registry/tests/registry.rs
// ============================================================================
// Module: Cookie Policy Registry Tests
// Description: Validate registration, lookup, removal, and enumeration.
// Purpose: Ensure case-insensitive routing and fail-closed argument checks.
// Dependencies: cookie-policy-registry, cookie-policy-core, serde_json
// ============================================================================
//! ## Overview
//! Covers the registry contract: case-folded keys, overwrite semantics,
//! insertion-ordered snapshots, parameter-driven lookup, and serialized
//! concurrent access.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cookie_policy_core::HttpParams;
use cookie_policy_core::SpecError;
use cookie_policy_core::params;
use cookie_policy_registry::CookiePolicyRegistry;
use cookie_policy_registry::RegistryError;
use serde_json::json;

use crate::common::OverlapTrackingFactory;
use crate::common::TaggedFactory;
use crate::common::failing_factory;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Looks up `name` and returns the tag of the factory that built the handler.
fn built_by(registry: &CookiePolicyRegistry, name: &str) -> String {
    registry
        .cookie_spec(name, None)
        .map(|spec| spec.name().to_string())
        .expect("lookup should succeed")
}

/// Looks up `name` and returns the error.
fn lookup_err(registry: &CookiePolicyRegistry, name: &str) -> RegistryError {
    registry.cookie_spec(name, None).err().expect("lookup should fail")
}

// ============================================================================
// SECTION: Registration and Lookup
// ============================================================================

#[test]
fn lookup_is_case_insensitive() {
    let registry = CookiePolicyRegistry::new();
    let factory = TaggedFactory::new("foo-factory");
    registry.register("Foo", factory.clone()).unwrap();

    assert_eq!(built_by(&registry, "fOO"), "foo-factory");
    assert_eq!(built_by(&registry, "foo"), "foo-factory");
    assert_eq!(built_by(&registry, "FOO"), "foo-factory");
    assert_eq!(factory.calls(), 3);
}

#[test]
fn each_lookup_builds_a_new_handler() {
    let registry = CookiePolicyRegistry::new();
    let factory = TaggedFactory::new("fresh");
    registry.register("fresh", factory.clone()).unwrap();

    let _first = registry.cookie_spec("fresh", None).unwrap();
    let _second = registry.cookie_spec("fresh", None).unwrap();
    assert_eq!(factory.calls(), 2);
}

#[test]
fn register_overwrites_same_folded_name() {
    let registry = CookiePolicyRegistry::new();
    let first = TaggedFactory::new("first");
    let second = TaggedFactory::new("second");
    registry.register("policy", first.clone()).unwrap();
    registry.register("POLICY", second.clone()).unwrap();

    assert_eq!(built_by(&registry, "Policy"), "second");
    assert_eq!(first.calls(), 0);
    assert_eq!(second.calls(), 1);
    assert_eq!(registry.names(), vec!["policy".to_string()]);
}

#[test]
fn overwrite_keeps_original_position() {
    let registry = CookiePolicyRegistry::new();
    registry.register("a", TaggedFactory::new("a1")).unwrap();
    registry.register("b", TaggedFactory::new("b")).unwrap();
    registry.register("A", TaggedFactory::new("a2")).unwrap();

    assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(built_by(&registry, "a"), "a2");
}

#[test]
fn unregister_then_lookup_fails_not_found() {
    let registry = CookiePolicyRegistry::new();
    registry.register("Temp", TaggedFactory::new("temp")).unwrap();
    assert!(registry.unregister("TEMP").unwrap());

    assert_eq!(lookup_err(&registry, "temp"), RegistryError::NotFound("temp".to_string()));
    assert!(!registry.contains("temp"));
}

#[test]
fn unregister_unknown_name_is_noop() {
    let registry = CookiePolicyRegistry::new();
    registry.register("kept", TaggedFactory::new("kept")).unwrap();

    assert!(!registry.unregister("missing").unwrap());
    assert_eq!(registry.names(), vec!["kept".to_string()]);
}

#[test]
fn lookup_of_unregistered_name_reports_name() {
    let registry = CookiePolicyRegistry::new();
    let err = lookup_err(&registry, "Unknown");
    assert_eq!(err, RegistryError::NotFound("Unknown".to_string()));
    assert_eq!(err.to_string(), "unsupported cookie spec: Unknown");
}

#[test]
fn factory_failures_propagate() {
    let registry = CookiePolicyRegistry::new();
    registry.register("broken", failing_factory).unwrap();

    assert_eq!(
        lookup_err(&registry, "broken"),
        RegistryError::Spec(SpecError::Construction("factory disabled".to_string()))
    );
}

#[test]
fn malformed_settings_surface_as_spec_errors() {
    let registry = CookiePolicyRegistry::new();
    registry.register("tagged", TaggedFactory::new("tagged")).unwrap();
    let bag = HttpParams::new().with_parameter(params::SINGLE_COOKIE_HEADER, "sometimes");

    let err = registry.cookie_spec("tagged", Some(&bag)).err().unwrap();
    assert!(matches!(err, RegistryError::Spec(SpecError::Params(_))));
    assert_eq!(err.kind(), "spec_construction");
}

#[test]
fn lookup_passes_params_to_factory() {
    let registry = CookiePolicyRegistry::new();
    registry.register("tagged", TaggedFactory::new("tagged")).unwrap();
    let bag = HttpParams::new().with_parameter(params::SINGLE_COOKIE_HEADER, true);

    let spec = registry.cookie_spec("tagged", Some(&bag)).unwrap();
    assert!(spec.settings().single_cookie_header);
    let spec = registry.cookie_spec("tagged", None).unwrap();
    assert!(!spec.settings().single_cookie_header);
}

// ============================================================================
// SECTION: Argument Validation
// ============================================================================

#[test]
fn empty_names_are_rejected_without_mutation() {
    let registry = CookiePolicyRegistry::new();
    registry.register("kept", TaggedFactory::new("kept")).unwrap();
    let before = registry.names();

    assert!(matches!(
        registry.register("", TaggedFactory::new("x")),
        Err(RegistryError::InvalidArgument(_))
    ));
    assert!(matches!(registry.unregister(""), Err(RegistryError::InvalidArgument(_))));
    assert!(matches!(lookup_err(&registry, ""), RegistryError::InvalidArgument(_)));

    assert_eq!(registry.names(), before);
    assert!(!registry.contains(""));
}

#[test]
fn whitespace_names_are_ordinary_keys() {
    let registry = CookiePolicyRegistry::new();
    registry.register("   ", TaggedFactory::new("spaces")).unwrap();
    registry.register(" Padded ", TaggedFactory::new("padded")).unwrap();

    assert_eq!(registry.names(), vec!["   ".to_string(), " padded ".to_string()]);
    assert_eq!(built_by(&registry, "   "), "spaces");
    assert_eq!(built_by(&registry, " PADDED "), "padded");
    assert!(matches!(lookup_err(&registry, "padded"), RegistryError::NotFound(_)));

    assert!(registry.unregister("   ").unwrap());
    assert_eq!(registry.names(), vec![" padded ".to_string()]);
}

// ============================================================================
// SECTION: Enumeration
// ============================================================================

#[test]
fn names_are_folded_and_insertion_ordered() {
    let registry = CookiePolicyRegistry::new();
    for name in ["Zeta", "alpha", "MIDDLE"] {
        registry.register(name, TaggedFactory::new(name)).unwrap();
    }
    assert_eq!(
        registry.names(),
        vec!["zeta".to_string(), "alpha".to_string(), "middle".to_string()]
    );
    assert_eq!(registry.len(), 3);
}

#[test]
fn names_snapshot_is_detached() {
    let registry = CookiePolicyRegistry::new();
    registry.register("one", TaggedFactory::new("one")).unwrap();

    let mut snapshot = registry.names();
    snapshot.push("injected".to_string());
    assert_eq!(registry.names(), vec!["one".to_string()]);

    let frozen = registry.names();
    registry.register("two", TaggedFactory::new("two")).unwrap();
    registry.unregister("one").unwrap();
    assert_eq!(frozen, vec!["one".to_string()]);
    assert_eq!(registry.names(), vec!["two".to_string()]);
}

#[test]
fn new_registry_is_empty() {
    let registry = CookiePolicyRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

#[test]
fn netscape_rfc2965_lifecycle() {
    let registry = CookiePolicyRegistry::new();
    let netscape = TaggedFactory::new("netscape-factory");
    let rfc2965 = TaggedFactory::new("rfc2965-factory");
    registry.register("Netscape", netscape.clone()).unwrap();
    registry.register("RFC2965", rfc2965).unwrap();

    assert_eq!(registry.names(), vec!["netscape".to_string(), "rfc2965".to_string()]);
    assert_eq!(built_by(&registry, "NETSCAPE"), "netscape-factory");
    assert_eq!(netscape.calls(), 1);

    registry.unregister("netscape").unwrap();
    assert!(matches!(lookup_err(&registry, "netscape"), RegistryError::NotFound(_)));
    assert_eq!(registry.names(), vec!["rfc2965".to_string()]);
}

#[test]
fn lookup_from_params_matches_explicit_lookup() {
    let registry = CookiePolicyRegistry::new();
    registry.register("rfc2965", TaggedFactory::new("rfc2965-factory")).unwrap();
    let bag = HttpParams::new()
        .with_parameter(params::COOKIE_POLICY, "rfc2965")
        .with_parameter(params::DATE_PATTERNS, json!(["yyyy"]));

    let from_params = registry.cookie_spec_from_params(&bag).unwrap();
    let explicit = registry.cookie_spec("rfc2965", Some(&bag)).unwrap();
    assert_eq!(from_params.name(), explicit.name());
    assert_eq!(from_params.settings(), explicit.settings());
    assert_eq!(from_params.settings().date_patterns, vec!["yyyy".to_string()]);
}

#[test]
fn lookup_from_params_folds_case() {
    let registry = CookiePolicyRegistry::new();
    registry.register("rfc2965", TaggedFactory::new("rfc2965-factory")).unwrap();
    let bag = HttpParams::new().with_parameter(params::COOKIE_POLICY, "RFC2965");
    assert_eq!(registry.cookie_spec_from_params(&bag).unwrap().name(), "rfc2965-factory");
}

#[test]
fn lookup_from_params_requires_policy_parameter() {
    let registry = CookiePolicyRegistry::new();
    registry.register("rfc2965", TaggedFactory::new("rfc2965-factory")).unwrap();

    let missing = registry.cookie_spec_from_params(&HttpParams::new()).err().unwrap();
    assert!(matches!(missing, RegistryError::InvalidArgument(_)));

    let mistyped = HttpParams::new().with_parameter(params::COOKIE_POLICY, json!(["rfc2965"]));
    let err = registry.cookie_spec_from_params(&mistyped).err().unwrap();
    assert!(matches!(err, RegistryError::InvalidArgument(_)));
}

#[test]
fn lookup_from_params_propagates_not_found() {
    let registry = CookiePolicyRegistry::new();
    let bag = HttpParams::new().with_parameter(params::COOKIE_POLICY, "netscape");
    assert_eq!(
        registry.cookie_spec_from_params(&bag).err().unwrap(),
        RegistryError::NotFound("netscape".to_string())
    );
}

#[test]
fn registries_are_independent() {
    let primary = CookiePolicyRegistry::with_builtin_specs();
    let secondary = CookiePolicyRegistry::new();
    secondary.register("custom", TaggedFactory::new("custom")).unwrap();

    assert!(matches!(lookup_err(&secondary, "netscape"), RegistryError::NotFound(_)));
    assert!(matches!(lookup_err(&primary, "custom"), RegistryError::NotFound(_)));
}

// ============================================================================
// SECTION: Concurrency
// ============================================================================

#[test]
fn concurrent_registration_is_serialized() {
    let registry = Arc::new(CookiePolicyRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for index in 0..25 {
                    let name = format!("Worker{worker}-Policy{index}");
                    registry.register(&name, TaggedFactory::new(name.clone())).unwrap();
                    assert_eq!(built_by(&registry, &name.to_uppercase()), name);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 200);
    assert!(registry.contains("worker7-policy24"));
}

#[test]
fn factory_invocations_never_overlap() {
    let registry = Arc::new(CookiePolicyRegistry::new());
    let factory = OverlapTrackingFactory::new(Duration::from_millis(5));
    registry.register("slow", factory.clone()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..5 {
                    assert_eq!(built_by(&registry, "SLOW"), "slow");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(factory.calls(), 20);
    assert_eq!(factory.peak_active(), 1);
}

#[test]
fn lookups_race_with_unregister_without_tearing() {
    let registry = Arc::new(CookiePolicyRegistry::new());
    registry.register("flip", TaggedFactory::new("flip")).unwrap();

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..500 {
                match registry.cookie_spec("flip", None) {
                    Ok(spec) => assert_eq!(spec.name(), "flip"),
                    Err(err) => assert!(matches!(err, RegistryError::NotFound(_))),
                }
            }
        })
    };
    for _ in 0..250 {
        registry.unregister("flip").unwrap();
        registry.register("flip", TaggedFactory::new("flip")).unwrap();
    }
    reader.join().unwrap();
    assert_eq!(registry.names(), vec!["flip".to_string()]);
}
