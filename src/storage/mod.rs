//! # Key-Value Storage
//!
//! String-keyed backend used for per-user preferences. Two implementations:
//! Redis (production, pooled) and an in-process map (tests, local runs).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Expiry::At for deadline-based expiry, `memory://` URLs
//! - 1.0.0: Initial release with Redis backend

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no value stored under '{0}'")]
    NotFound(String),
    #[error("value '{value}' stored under '{key}' cannot be parsed")]
    Malformed { key: String, value: String },
    #[error("expiration time is less than zero")]
    Expired,
    #[error("key-value backend failure: {0}")]
    Transport(String),
}

impl StoreError {
    /// True when the failure is just the absence of a value
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// The four backend operations the preference store needs
///
/// Implementations must be safe to share between concurrently running event
/// handlers. Writes to the same key are last-write-wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// GET: `None` when the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// SET without expiry
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// SETEX: value disappears after `seconds`
    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), StoreError>;

    /// DEL: deleting an absent key is not an error
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}

/// Expiry policy for a single write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Never,
    /// Relative lifetime, rounded down to whole seconds
    In(Duration),
    /// Absolute wall-clock deadline
    At(DateTime<Utc>),
}

impl Expiry {
    /// Seconds until expiry as seen from `now`, `None` for keys that never expire
    pub fn seconds_from(&self, now: DateTime<Utc>) -> Result<Option<u64>, StoreError> {
        let seconds = match self {
            Expiry::Never => return Ok(None),
            Expiry::In(duration) => duration.as_secs(),
            Expiry::At(deadline) => u64::try_from((*deadline - now).num_seconds()).unwrap_or(0),
        };
        if seconds == 0 {
            return Err(StoreError::Expired);
        }
        Ok(Some(seconds))
    }
}

/// Write `value` under `key` with the given expiry (SET or SETEX)
pub async fn write(
    store: &dyn KeyValueStore,
    key: &str,
    value: &str,
    expiry: Expiry,
) -> Result<(), StoreError> {
    match expiry.seconds_from(Utc::now())? {
        None => store.set(key, value).await,
        Some(seconds) => store.set_ex(key, value, seconds).await,
    }
}

/// Open the backend named by `url`
///
/// `memory://` selects the in-process store; anything else is handed to Redis.
pub async fn connect(
    url: &str,
    pool_size: u32,
    timeout: Duration,
) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    if url.starts_with("memory://") {
        info!("Using in-memory key-value store (state is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = RedisStore::connect(url, pool_size, timeout).await?;
    store.ping().await?;
    info!("Connected to Redis (pool size {pool_size})");
    Ok(Arc::new(store))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_has_no_ttl() {
        assert_eq!(Expiry::Never.seconds_from(Utc::now()).unwrap(), None);
    }

    #[test]
    fn test_relative_expiry_in_seconds() {
        let expiry = Expiry::In(Duration::from_secs(3600));
        assert_eq!(expiry.seconds_from(Utc::now()).unwrap(), Some(3600));
    }

    #[test]
    fn test_absolute_expiry_in_seconds() {
        let now = Utc::now();
        let expiry = Expiry::At(now + chrono::Duration::days(365));
        assert_eq!(expiry.seconds_from(now).unwrap(), Some(365 * 24 * 3600));
    }

    #[test]
    fn test_past_deadline_is_rejected() {
        let now = Utc::now();
        let expiry = Expiry::At(now - chrono::Duration::seconds(5));
        assert!(matches!(expiry.seconds_from(now), Err(StoreError::Expired)));
    }

    #[test]
    fn test_zero_lifetime_is_rejected() {
        let expiry = Expiry::In(Duration::from_millis(500));
        assert!(matches!(
            expiry.seconds_from(Utc::now()),
            Err(StoreError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_write_with_past_deadline_stores_nothing() {
        let store = MemoryStore::new();
        let expiry = Expiry::At(Utc::now() - chrono::Duration::seconds(1));

        let result = write(&store, "k", "v", expiry).await;

        assert!(matches!(result, Err(StoreError::Expired)));
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_connect_memory_url() {
        let store = connect("memory://", 1, Duration::from_secs(1)).await.unwrap();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
