use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("No tester registered for website: {0}")]
    UnknownWebsite(String),

    #[error("Invalid test URL: {0}")]
    InvalidTestUrl(#[from] url::ParseError),

    #[error("Invalid auth scheme: {0}")]
    InvalidAuthScheme(String),

    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Storage failed: {0}")]
    StorageError(#[from] redis::RedisError),
}
