//! Redis-backed key-value store
//!
//! Connections come from a process-wide bb8 pool; each operation checks one
//! out and returns it when the guard drops.

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::{self, AsyncCommands};
use bb8_redis::RedisConnectionManager;
use std::time::Duration;

use super::{KeyValueStore, StoreError};

#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
}

fn transport(err: impl std::fmt::Display) -> StoreError {
    StoreError::Transport(err.to_string())
}

impl RedisStore {
    /// Build the connection pool. No connection is opened until first use.
    pub async fn connect(url: &str, max_size: u32, timeout: Duration) -> Result<Self, StoreError> {
        if max_size == 0 || timeout.is_zero() {
            return Err(StoreError::InvalidArgument(
                "pool size and connection timeout must be non-zero".to_string(),
            ));
        }
        let manager = RedisConnectionManager::new(url).map_err(transport)?;
        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(timeout)
            .build(manager)
            .await
            .map_err(transport)?;
        Ok(Self { pool })
    }

    /// Round-trip a PING to make sure the server is reachable
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(transport)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(transport)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(transport)?;
        let value: Option<String> = conn.get(key).await.map_err(transport)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(transport)?;
        let _: () = conn.set(key, value).await.map_err(transport)?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(transport)?;
        let _: () = conn.set_ex(key, value, seconds).await.map_err(transport)?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(transport)?;
        let _: () = conn.del(key).await.map_err(transport)?;
        Ok(())
    }
}
