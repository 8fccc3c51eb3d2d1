use crate::error::PoolError;
use crate::metrics::PoolMetrics;
use crate::rate_limiter::RateLimiter;
use crate::store::CredentialStore;
use crate::tester::{CredentialTester, TestOutcome};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Serialize)]
pub struct TestReport {
    pub website: String,
    pub tested: usize,
    pub valid: usize,
    pub removed: usize,
    pub skipped: usize,
}

pub struct TesterService {
    tester: Box<dyn CredentialTester>,
    store: Arc<dyn CredentialStore>,
    rate_limiter: Arc<RateLimiter>,
}

impl TesterService {
    pub fn new(
        tester: Box<dyn CredentialTester>,
        store: Arc<dyn CredentialStore>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            tester,
            store,
            rate_limiter,
        }
    }

    // One pass over the store: probe each credential in turn, drop the
    // ones the website rejects, leave unreachable ones alone.
    pub async fn run_once(&self) -> Result<TestReport, PoolError> {
        let website = self.tester.website();
        let credentials = self.store.all().await?;

        let mut report = TestReport {
            website: website.to_string(),
            ..TestReport::default()
        };

        if credentials.is_empty() {
            info!(website, "no credentials stored");
            return Ok(report);
        }

        for (username, credential) in credentials {
            self.rate_limiter.acquire(website).await;
            report.tested += 1;

            match self.tester.test(&username, &credential).await {
                TestOutcome::Valid => {
                    PoolMetrics::record_test_result(website, true);
                    info!(website, username = %username, "credential is valid");
                    report.valid += 1;
                }
                TestOutcome::Invalid => {
                    PoolMetrics::record_test_result(website, false);
                    match self.store.delete(&username).await {
                        Ok(()) => {
                            PoolMetrics::record_removed(website);
                            info!(website, username = %username, "credential removed");
                            report.removed += 1;
                        }
                        Err(e) => {
                            warn!(website, username = %username, error = %e, "delete failed");
                        }
                    }
                }
                TestOutcome::Indeterminate => {
                    PoolMetrics::record_connection_error(website);
                    report.skipped += 1;
                }
            }
        }

        info!(
            website,
            tested = report.tested,
            valid = report.valid,
            removed = report.removed,
            skipped = report.skipped,
            "test pass finished"
        );

        Ok(report)
    }
}
