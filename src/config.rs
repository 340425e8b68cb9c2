use std::{env, time::Duration};

pub const DEFAULT_CASES_URL: &str =
    "https://www.berlin.de/lageso/_assets/gesundheit/publikationen/corona/meldedatum_bezirk.csv";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub cases_url: String,
    pub fetch_timeout: Duration,
    /// Retry a failed fetch once when the failure looks transient.
    pub fetch_retry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cases_url: DEFAULT_CASES_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            fetch_retry: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Missing or malformed
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let cases_url = lookup("CASES_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.cases_url);

        let fetch_timeout = lookup("FETCH_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        let fetch_retry = lookup("FETCH_RETRY")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.fetch_retry);

        Self {
            port,
            cases_url,
            fetch_timeout,
            fetch_retry,
        }
    }
}
