//! Property-test run profile read from the environment.
//!
//! CI raises the case count for nightly jobs and may fork each case into its
//! own process; local runs fall back to the defaults each suite declares.

use std::env;

use thiserror::Error;

/// Environment variable overriding the number of cases per property.
pub const FIBFOREST_PBT_CASES_ENV_KEY: &str = "FIBFOREST_PBT_CASES";
/// Environment variable enabling per-case process forking.
pub const FIBFOREST_PBT_FORK_ENV_KEY: &str = "FIBFOREST_PBT_FORK";

/// Reasons an override was ignored.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// The case count was not a positive integer.
    #[error("expected a positive integer case count")]
    InvalidCases,
    /// The fork flag was not a recognised boolean spelling.
    #[error("expected one of: true/false/1/0/yes/no/on/off")]
    InvalidFlag,
}

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, applying any valid environment overrides on top of
    /// the supplied defaults. Invalid overrides are logged and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibforest_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(FIBFOREST_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(FIBFOREST_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, OverrideError>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, %reason, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(cases) if cases > 0 => Ok(cases),
        _ => Err(OverrideError::InvalidCases),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::InvalidFlag),
    }
}
