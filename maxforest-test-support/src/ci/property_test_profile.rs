//! Property-test run profile read from the environment.
//!
//! `PROGTEST_CASES` scales case counts for every suite and
//! `MAXFOREST_PBT_FORK` runs cases in forked subprocesses. Invalid values are
//! logged and ignored.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const MAXFOREST_PBT_FORK_ENV_KEY: &str = "MAXFOREST_PBT_FORK";

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the profile, falling back to the supplied defaults for unset or
    /// invalid variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use maxforest_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(MAXFOREST_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

/// Reads a positive count from `key`, returning `default` when the variable is
/// unset and logging a warning when it is not a positive integer.
///
/// # Examples
///
/// ```
/// use maxforest_test_support::ci::property_test_profile::positive_count_or;
///
/// assert_eq!(positive_count_or("MAXFOREST_DOCTEST_UNSET_COUNT", 3), 3);
/// ```
#[must_use]
pub fn positive_count_or(key: &'static str, default: usize) -> usize {
    override_or(key, default, parse_count)
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(raw.trim()).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|&cases| cases > 0)
}

fn parse_count(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|&count| count > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
