use crate::error::PoolError;
use async_trait::async_trait;
use bb8::{Pool, PooledConnection, RunError};
use bb8_redis::RedisConnectionManager;
use std::collections::HashMap;

// The contract the tester assumes of the external credential store:
// list everything, delete one entry by username.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn all(&self) -> Result<Vec<(String, String)>, PoolError>;
    async fn delete(&self, username: &str) -> Result<(), PoolError>;
}

pub struct RedisCredentialStore {
    pool: Pool<RedisConnectionManager>,
    key: String,
}

impl RedisCredentialStore {
    pub async fn new(redis_url: &str, website: &str) -> Result<Self, PoolError> {
        let manager = RedisConnectionManager::new(redis_url)?;
        let pool = Pool::builder().build(manager).await?;
        Ok(Self {
            pool,
            key: format!("credentials:{}", website),
        })
    }

    async fn conn(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, PoolError> {
        self.pool.get().await.map_err(|e| match e {
            RunError::User(e) => e.into(),
            RunError::TimedOut => redis::RedisError::from((
                redis::ErrorKind::IoError,
                "Connection timed out",
            ))
            .into(),
        })
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn all(&self) -> Result<Vec<(String, String)>, PoolError> {
        let mut conn = self.conn().await?;
        let entries: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(&self.key)
            .query_async(&mut *conn)
            .await?;

        Ok(entries.into_iter().collect())
    }

    async fn delete(&self, username: &str) -> Result<(), PoolError> {
        let mut conn = self.conn().await?;
        let _: () = redis::cmd("HDEL")
            .arg(&self.key)
            .arg(username)
            .query_async(&mut *conn)
            .await?;
        Ok(())
    }
}
