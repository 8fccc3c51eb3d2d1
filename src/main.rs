use accountpool::config::Config;
use accountpool::rate_limiter::RateLimiter;
use accountpool::service::TesterService;
use accountpool::store::RedisCredentialStore;
use accountpool::tester::build_tester;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        website = %config.website,
        test_url = %config.test_url,
        timeout_secs = config.request_timeout.as_secs(),
        "starting credential test pass"
    );

    let store = match RedisCredentialStore::new(&config.redis_url, &config.website).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to Redis: {}", e);
            std::process::exit(1);
        }
    };

    let tester = match build_tester(&config) {
        Ok(tester) => tester,
        Err(e) => {
            error!("Failed to build tester: {}", e);
            std::process::exit(1);
        }
    };

    let rate_limiter = Arc::new(RateLimiter::new(
        &config.website,
        config.rate_limit_per_sec,
    ));
    let service = TesterService::new(tester, Arc::new(store), rate_limiter);

    match service.run_once().await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize report: {}", e),
        },
        Err(e) => {
            error!("Test pass failed: {}", e);
            std::process::exit(1);
        }
    }
}
