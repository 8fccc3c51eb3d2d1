use metrics::counter;

pub struct PoolMetrics;

impl PoolMetrics {
    // Record validity verdict of a single probe
    pub fn record_test_result(website: &str, valid: bool) {
        counter!("credential_tests_total", "website" => website.to_string(), "valid" => valid.to_string())
            .increment(1);
    }

    // Record a credential removed from the store
    pub fn record_removed(website: &str) {
        counter!("credentials_removed_total", "website" => website.to_string()).increment(1);
    }

    // Record a probe that could not reach the website
    pub fn record_connection_error(website: &str) {
        counter!("credential_test_errors_total", "website" => website.to_string()).increment(1);
    }
}
