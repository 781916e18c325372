use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

use crate::domain::entities::dataset::{DatasetId, SheetPage};
use crate::domain::entities::pagination::Pagination;
use crate::usecase::ports::api::ApiError;
use crate::usecase::query_cache::{sheet_key, sheet_prefix, QueryCache, QueryKey};
use crate::usecase::services::sheet_service::SheetService;

/// Shared page cache. Entries are read without subscribing; `epoch` is what
/// resources subscribe to, so an invalidation reruns every page query.
#[derive(Clone, Copy, PartialEq)]
pub struct QueryClient {
    cache: Signal<QueryCache<SheetPage>>,
    epoch: Signal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: Signal::new(QueryCache::default()),
            epoch: Signal::new(0),
        }
    }

    /// Subscribes the calling scope to invalidations.
    pub fn epoch(&self) -> u64 {
        (self.epoch)()
    }

    pub fn cached(&self, key: &QueryKey) -> Option<SheetPage> {
        let hit = self.cache.peek().get(key);
        if hit.is_some() {
            debug!(key = ?key.parts(), "page served from cache");
        }
        hit
    }

    pub fn store(&self, key: QueryKey, page: SheetPage) {
        let mut cache = self.cache;
        cache.write().insert(key, page);
    }

    /// Cached page for `pagination`, fetched and stored on a miss.
    pub async fn fetch_page(
        &self,
        service: &SheetService,
        dataset_id: &DatasetId,
        pagination: Pagination,
    ) -> Result<SheetPage, ApiError> {
        let key = sheet_key(dataset_id, pagination);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }
        let fetched = service.fetch_page(dataset_id, pagination).await?;
        self.store(key, fetched.clone());
        Ok(fetched)
    }

    pub fn invalidate_sheet(&self, dataset_id: &DatasetId) {
        let mut cache = self.cache;
        cache.write().invalidate(&sheet_prefix(dataset_id));
        self.refresh();
    }

    /// Reruns subscribed queries without dropping entries.
    pub fn refresh(&self) {
        let mut epoch = self.epoch;
        *epoch.write() += 1;
    }

    /// Drops a dataset's pages without waking anyone. Safe to call while the
    /// owning scope is being torn down.
    pub fn forget_sheet(&self, dataset_id: &DatasetId) {
        let mut cache = self.cache;
        if let Ok(mut entries) = cache.try_write() {
            entries.invalidate(&sheet_prefix(dataset_id));
        };
    }
}
