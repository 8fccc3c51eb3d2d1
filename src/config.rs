use crate::error::PoolError;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

// Built-in test targets, keyed by website name. A website missing from
// this table needs TEST_URL and AUTH_SCHEME set explicitly.
const WEBSITE_DEFAULTS: &[(&str, &str, AuthScheme)] = &[
    (
        "antispider6",
        "https://antispider6.scrape.center/",
        AuthScheme::Cookie,
    ),
    (
        "antispider7",
        "https://antispider7.scrape.center/",
        AuthScheme::Jwt,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Cookie,
    Jwt,
}

impl FromStr for AuthScheme {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cookie" => Ok(AuthScheme::Cookie),
            "jwt" | "bearer" => Ok(AuthScheme::Jwt),
            other => Err(PoolError::InvalidAuthScheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub website: String,
    pub redis_url: String,
    pub test_url: Url,
    pub auth_scheme: AuthScheme,
    pub request_timeout: Duration,
    pub rate_limit_per_sec: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, PoolError> {
        let website =
            std::env::var("WEBSITE").map_err(|_| PoolError::MissingConfig("WEBSITE"))?;
        let redis_url =
            std::env::var("REDIS_URL").map_err(|_| PoolError::MissingConfig("REDIS_URL"))?;

        let defaults = website_defaults(&website);

        let test_url = match std::env::var("TEST_URL") {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => match defaults {
                Some((url, _)) => Url::parse(url)?,
                None => return Err(PoolError::UnknownWebsite(website)),
            },
        };

        let auth_scheme = match std::env::var("AUTH_SCHEME") {
            Ok(raw) => raw.parse()?,
            Err(_) => match defaults {
                Some((_, scheme)) => scheme,
                None => return Err(PoolError::UnknownWebsite(website)),
            },
        };

        let request_timeout = std::env::var("TEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let rate_limit_per_sec = std::env::var("RATE_LIMIT_PER_SEC")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            website,
            redis_url,
            test_url,
            auth_scheme,
            request_timeout,
            rate_limit_per_sec,
        })
    }
}

pub fn website_defaults(website: &str) -> Option<(&'static str, AuthScheme)> {
    WEBSITE_DEFAULTS
        .iter()
        .find(|(name, _, _)| *name == website)
        .map(|(_, url, scheme)| (*url, *scheme))
}
