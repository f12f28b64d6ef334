use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::distance::DistanceLookup;

/// Memoizes successful lookups per (from, to) pair. Failures are not
/// cached so a later call can still succeed.
pub struct CachedDistanceLookup<L> {
    inner: L,
    cache: Mutex<HashMap<(String, String), f64>>,
}

impl<L: DistanceLookup> CachedDistanceLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().expect("distance cache mutex poisoned").len()
    }

    fn get(&self, key: &(String, String)) -> Option<f64> {
        let guard = self.cache.lock().expect("distance cache mutex poisoned");
        guard.get(key).copied()
    }

    fn put(&self, key: (String, String), miles: f64) {
        let mut guard = self.cache.lock().expect("distance cache mutex poisoned");
        guard.insert(key, miles);
    }
}

fn cache_key(from: &str, to: &str) -> (String, String) {
    (
        from.trim().to_ascii_lowercase(),
        to.trim().to_ascii_lowercase(),
    )
}

#[async_trait]
impl<L: DistanceLookup> DistanceLookup for CachedDistanceLookup<L> {
    async fn distance_miles(&self, from_address: &str, to_address: &str) -> Result<f64> {
        let key = cache_key(from_address, to_address);
        if let Some(miles) = self.get(&key) {
            return Ok(miles);
        }
        let miles = self.inner.distance_miles(from_address, to_address).await?;
        self.put(key, miles);
        Ok(miles)
    }
}
