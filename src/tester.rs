use crate::config::{AuthScheme, Config};
use crate::error::PoolError;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Valid,
    Invalid,
    Indeterminate,
}

#[async_trait]
pub trait CredentialTester: Send + Sync {
    fn website(&self) -> &str;
    fn test_url(&self) -> &str;
    fn client(&self) -> &reqwest::Client;

    // How the credential rides the probe request. This is the only point
    // where the website variants differ.
    fn attach_credential(&self, request: RequestBuilder, credential: &str) -> RequestBuilder;

    async fn test(&self, username: &str, credential: &str) -> TestOutcome {
        info!(website = self.website(), username, "testing credential");

        let request = self.attach_credential(self.client().get(self.test_url()), credential);
        match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => TestOutcome::Valid,
            Ok(response) => {
                info!(
                    website = self.website(),
                    username,
                    status = %response.status(),
                    "credential is not valid"
                );
                TestOutcome::Invalid
            }
            Err(e) => {
                warn!(website = self.website(), username, error = %e, "test failed");
                TestOutcome::Indeterminate
            }
        }
    }
}

fn probe_client(timeout: Duration) -> Result<reqwest::Client, PoolError> {
    let client = reqwest::Client::builder()
        .user_agent(*USER_AGENTS.choose(&mut rand::thread_rng()).unwrap())
        .connect_timeout(timeout)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

// Sends the stored credential verbatim as the Cookie header.
pub struct CookieTester {
    website: String,
    test_url: String,
    client: reqwest::Client,
}

impl CookieTester {
    pub fn new(
        website: impl Into<String>,
        test_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PoolError> {
        Ok(Self {
            website: website.into(),
            test_url: test_url.into(),
            client: probe_client(timeout)?,
        })
    }
}

#[async_trait]
impl CredentialTester for CookieTester {
    fn website(&self) -> &str {
        &self.website
    }

    fn test_url(&self) -> &str {
        &self.test_url
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn attach_credential(&self, request: RequestBuilder, credential: &str) -> RequestBuilder {
        request.header(reqwest::header::COOKIE, credential)
    }
}

// Sends the stored credential as a jwt-prefixed authorization header.
pub struct JwtTester {
    website: String,
    test_url: String,
    client: reqwest::Client,
}

impl JwtTester {
    pub fn new(
        website: impl Into<String>,
        test_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PoolError> {
        Ok(Self {
            website: website.into(),
            test_url: test_url.into(),
            client: probe_client(timeout)?,
        })
    }
}

#[async_trait]
impl CredentialTester for JwtTester {
    fn website(&self) -> &str {
        &self.website
    }

    fn test_url(&self) -> &str {
        &self.test_url
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn attach_credential(&self, request: RequestBuilder, credential: &str) -> RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("jwt {}", credential),
        )
    }
}

pub fn build_tester(config: &Config) -> Result<Box<dyn CredentialTester>, PoolError> {
    let tester: Box<dyn CredentialTester> = match config.auth_scheme {
        AuthScheme::Cookie => Box::new(CookieTester::new(
            &config.website,
            config.test_url.as_str(),
            config.request_timeout,
        )?),
        AuthScheme::Jwt => Box::new(JwtTester::new(
            &config.website,
            config.test_url.as_str(),
            config.request_timeout,
        )?),
    };

    Ok(tester)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_tester_sets_cookie_header() {
        let tester =
            CookieTester::new("antispider6", "https://example.com/", Duration::from_secs(5))
                .unwrap();

        let request = tester
            .attach_credential(tester.client().get(tester.test_url()), "session=abc123")
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(reqwest::header::COOKIE).unwrap(),
            "session=abc123"
        );
        assert!(request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .is_none());
    }

    #[test]
    fn jwt_tester_sets_authorization_header() {
        let tester =
            JwtTester::new("antispider7", "https://example.com/", Duration::from_secs(5)).unwrap();

        let request = tester
            .attach_credential(tester.client().get(tester.test_url()), "token456")
            .build()
            .unwrap();

        assert_eq!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .unwrap(),
            "jwt token456"
        );
    }
}
