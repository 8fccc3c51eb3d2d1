use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as Governor};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

pub struct RateLimiter {
    limiters: HashMap<String, Arc<DefaultDirectRateLimiter>>,
}

impl RateLimiter {
    pub fn new(website: &str, per_second: u32) -> Self {
        let mut limiters = HashMap::new();

        let quota = Quota::per_second(NonZeroU32::new(per_second.max(1)).unwrap());
        limiters.insert(website.to_string(), Arc::new(Governor::direct(quota)));

        Self { limiters }
    }

    pub fn check_rate_limit(&self, website: &str) -> bool {
        if let Some(limiter) = self.limiters.get(website) {
            limiter.check().is_ok()
        } else {
            true
        }
    }

    // Probes stay one at a time; this only spaces them out.
    pub async fn acquire(&self, website: &str) {
        while !self.check_rate_limit(website) {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_denies_burst_above_limit() {
        let limiter = RateLimiter::new("antispider6", 1);
        assert!(limiter.check_rate_limit("antispider6"));
        assert!(!limiter.check_rate_limit("antispider6"));
    }

    #[test]
    fn unknown_website_is_unlimited() {
        let limiter = RateLimiter::new("antispider6", 1);
        assert!(limiter.check_rate_limit("antispider7"));
        assert!(limiter.check_rate_limit("antispider7"));
    }
}
