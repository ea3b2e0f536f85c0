use crate::domain::price::PricePoint;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Raw price history per asset id.
///
/// Entries are never evicted or refreshed: an asset fetched once is served
/// from memory until the process exits, even as upstream prices move.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    inner: Arc<RwLock<HashMap<String, Arc<Vec<PricePoint>>>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, asset_id: &str) -> Option<Arc<Vec<PricePoint>>> {
        self.inner.read().await.get(asset_id).cloned()
    }

    /// Last writer wins when two requests race on the same asset.
    pub async fn insert(&self, asset_id: &str, series: Vec<PricePoint>) -> Arc<Vec<PricePoint>> {
        let series = Arc::new(series);
        self.inner
            .write()
            .await
            .insert(asset_id.to_string(), Arc::clone(&series));
        series
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_overwrites_existing_entry() {
        let cache = AssetCache::new();
        assert!(cache.get("bitcoin").await.is_none());

        cache.insert("bitcoin", vec![PricePoint::new(1, 1.0)]).await;
        cache.insert("bitcoin", vec![PricePoint::new(2, 2.0)]).await;

        let cached = cache.get("bitcoin").await.unwrap();
        assert_eq!(cached.as_slice(), &[PricePoint::new(2, 2.0)]);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let cache = AssetCache::new();
        let other = cache.clone();
        other.insert("solana", vec![PricePoint::new(1, 150.0)]).await;
        assert!(cache.get("solana").await.is_some());
        assert!(!cache.is_empty().await);
    }
}
