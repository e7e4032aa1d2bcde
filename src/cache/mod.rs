//! Key-value cache used to memoize the brand listing aggregation.
//!
//! The backend is an explicit dependency injected into the catalog service
//! at process start; there are no hidden statics. Entries expire on a
//! per-key TTL and are never invalidated on catalog mutation, so a listing
//! stays stale until its window elapses.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Well-known cache keys.
pub mod keys {
    /// Brands with their active sneakers, as served by the browse listing.
    pub const BRAND_LISTING: &str = "catalog:brand-listing";
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

#[async_trait::async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;
}

/// Fetch and deserialize a cached JSON value.
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn CacheBackend,
    key: &str,
) -> Result<Option<T>, CacheError> {
    match cache.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and store a JSON value with an expiry.
pub async fn set_json<T: Serialize>(
    cache: &dyn CacheBackend,
    key: &str,
    value: &T,
    ttl: Duration,
) -> Result<(), CacheError> {
    let raw = serde_json::to_string(value)?;
    cache.set(key, &raw, Some(ttl)).await
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: String, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|d| Instant::now() + d),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() > at)
    }
}

/// In-process cache with per-key TTL and atomic get/set at key granularity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let expired = {
            let store = self
                .store
                .read()
                .map_err(|e| CacheError::OperationFailed(e.to_string()))?;
            match store.get(key) {
                Some(entry) if entry.is_expired() => true,
                Some(entry) => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
            }
        };
        if expired {
            self.delete(key).await?;
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self
            .store
            .write()
            .map_err(|e| CacheError::OperationFailed(e.to_string()))?;
        store.insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self
            .store
            .write()
            .map_err(|e| CacheError::OperationFailed(e.to_string()))?;
        store.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let store = self
            .store
            .read()
            .map_err(|e| CacheError::OperationFailed(e.to_string()))?;
        Ok(store.get(key).map(|e| !e.is_expired()).unwrap_or(false))
    }
}
