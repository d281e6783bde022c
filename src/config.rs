//! Runtime configuration comes from the environment (`.env` is honored via
//! dotenvy in `main`), plus a little hard-coded config.

use anyhow::{Context, Result};
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_API_BASE: &str =
    "https://smartrent-backend-d5ec.onrender.com/api";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// How many payments the dashboard's recent activity feed shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Toasts remove themselves after this long.
pub const NOTIFICATION_TTL_MS: u64 = 5000;

/// The record-payment form offers this many months, starting with the
/// current one.
pub const MONTH_OPTION_COUNT: u32 = 12;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub addr: SocketAddr,
    pub api_timeout: Duration,
    pub session_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base = lookup("SMARTRENT_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let addr = lookup("SMARTRENT_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("SMARTRENT_ADDR must be a socket address")?;
        let api_timeout = match lookup("SMARTRENT_API_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .context("SMARTRENT_API_TIMEOUT_SECS must be an integer")?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };
        let session_secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .context("session secret to be defined in the environment")?;

        Ok(Self {
            api_base,
            addr,
            api_timeout: Duration::from_secs(api_timeout),
            session_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config =
            Config::from_lookup(lookup_from(&[("SESSION_SECRET", "foo")]))
                .expect("config");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.api_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_session_secret_is_required() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("SESSION_SECRET", "")])).is_err()
        );
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("SESSION_SECRET", "foo"),
            ("SMARTRENT_API_BASE", "http://localhost:5000/api"),
            ("SMARTRENT_ADDR", "0.0.0.0:9000"),
            ("SMARTRENT_API_TIMEOUT_SECS", "5"),
        ]))
        .expect("config");
        assert_eq!(config.api_base, "http://localhost:5000/api");
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.api_timeout, Duration::from_secs(5));

        assert!(Config::from_lookup(lookup_from(&[
            ("SESSION_SECRET", "foo"),
            ("SMARTRENT_ADDR", "not an address"),
        ]))
        .is_err());
    }
}
