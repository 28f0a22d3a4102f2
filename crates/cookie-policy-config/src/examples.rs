// crates/cookie-policy-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `cookie-policy.toml`. The example is parsed and
//! validated by the test suite so it cannot drift from the config model.

/// Returns a canonical example `cookie-policy.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[registry]
builtins = ["compatibility", "netscape", "rfc2109", "rfc2965", "ignoreCookies"]

[params]
"http.protocol.cookie-policy" = "rfc2965"
"http.protocol.single-cookie-header" = false
"http.protocol.cookie-datepatterns" = [
    "EEE, dd MMM yyyy HH:mm:ss zzz",
    "EEEE, dd-MMM-yy HH:mm:ss zzz",
    "EEE MMM d HH:mm:ss yyyy",
]

[audit]
sink = "file"
path = "cookie-policy-audit.jsonl"
# sink = "stderr"
# sink = "none"
"#,
    )
}
