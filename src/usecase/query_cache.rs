use std::collections::BTreeMap;

use dioxus::logger::tracing::debug;

use crate::domain::entities::dataset::DatasetId;
use crate::domain::entities::pagination::Pagination;

const SHEETS: &str = "sheets";

/// Hierarchical cache key. Invalidation matches on a leading run of parts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryKey(parts.into_iter().map(Into::into).collect())
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

/// Every cached page of one dataset.
pub fn sheet_prefix(dataset_id: &DatasetId) -> QueryKey {
    QueryKey::new([SHEETS.to_string(), dataset_id.0.clone()])
}

/// One page window of one dataset.
pub fn sheet_key(dataset_id: &DatasetId, pagination: Pagination) -> QueryKey {
    QueryKey::new([
        SHEETS.to_string(),
        dataset_id.0.clone(),
        pagination.page_index.to_string(),
        pagination.page_size.to_string(),
    ])
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCache<V> {
    entries: BTreeMap<QueryKey, V>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: QueryKey, value: V) {
        self.entries.insert(key, value);
    }

    /// Drops every entry under `prefix`; returns how many went.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        debug!(prefix = ?prefix.parts(), removed, "invalidated cached queries");
        removed
    }
}
