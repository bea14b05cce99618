//! Property-test configuration overridable from the environment.
//!
//! `DSF_PROPTEST_CASES` raises or lowers the number of cases every property
//! suite runs, so CI can run deeper sweeps than local builds.

use std::env;

use proptest::test_runner::Config as ProptestConfig;

/// Environment variable controlling proptest case counts.
pub const PROPTEST_CASES_ENV_KEY: &str = "DSF_PROPTEST_CASES";

/// Builds a proptest configuration running `default_cases` unless overridden.
///
/// Invalid overrides are logged and ignored.
///
/// # Examples
/// ```
/// use dsf_test_support::profile::suite_config;
///
/// let config = suite_config(32);
/// assert!(config.cases > 0);
/// ```
#[must_use]
pub fn suite_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: cases_from_env(default_cases),
        ..ProptestConfig::default()
    }
}

fn cases_from_env(default_cases: u32) -> u32 {
    let Ok(raw) = env::var(PROPTEST_CASES_ENV_KEY) else {
        return default_cases;
    };
    match parse_cases(&raw) {
        Ok(cases) => cases,
        Err(reason) => {
            tracing::warn!(
                env = PROPTEST_CASES_ENV_KEY,
                raw = %raw,
                reason = %reason,
                "invalid property-test case override; using default",
            );
            default_cases
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
