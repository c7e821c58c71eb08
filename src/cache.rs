//! Per-entity result cache for the ticker panels.
//!
//! Each panel (geographic analysis, corporate actions, broker research)
//! keeps one [`EntityCache`] keyed by ticker. Data is fetched lazily the first
//! time a ticker is shown and kept for the session; a refresh always
//! refetches and overwrites the entry.
//!
//! Fetches for the same ticker are not coalesced: two misses in flight both
//! hit the fetcher and whichever response lands last is what stays cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fetcher::Fetcher;

// ---------------------------------------------------------------------------
// EntityResult
// ---------------------------------------------------------------------------

/// Outcome of loading one entity. Serializes as `{"data": ...}` or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityResult<T> {
    Data(T),
    Error(String),
}

impl<T> EntityResult<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, EntityResult::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EntityResult::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            EntityResult::Data(data) => Some(data),
            EntityResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EntityResult::Data(_) => None,
            EntityResult::Error(message) => Some(message),
        }
    }
}

impl<T> From<Result<T>> for EntityResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => EntityResult::Data(data),
            Err(e) => EntityResult::Error(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// EntityCache
// ---------------------------------------------------------------------------

/// Ticker -> [`EntityResult`] cache with fetch-on-first-view.
///
/// Cloning yields another handle to the same entries.
pub struct EntityCache<T> {
    /// Panel name used in log events.
    label: &'static str,
    entries: Arc<Mutex<HashMap<String, EntityResult<T>>>>,
}

impl<T> Clone for EntityCache<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: Clone> EntityCache<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    // The map is only touched between awaits, so a poisoned lock still
    // holds consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, EntityResult<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached result for `id`, if any fetch for it has settled.
    pub fn get(&self, id: &str) -> Option<EntityResult<T>> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Store a result directly, replacing any previous entry.
    pub fn insert(&self, id: impl Into<String>, result: EntityResult<T>) {
        self.lock().insert(id.into(), result);
    }

    pub fn remove(&self, id: &str) -> Option<EntityResult<T>> {
        self.lock().remove(id)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cached ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Return the cached result for `id`, fetching it first on a miss.
    ///
    /// A fetch failure is cached as [`EntityResult::Error`] and returned; it
    /// is not retried until [`refresh`](Self::refresh).
    pub async fn ensure<F>(&self, id: &str, fetcher: &F) -> EntityResult<T>
    where
        F: Fetcher<T> + ?Sized,
    {
        if let Some(hit) = self.get(id) {
            debug!(cache = self.label, id, "cache hit");
            return hit;
        }
        debug!(cache = self.label, id, "cache miss, fetching");
        self.load(id, fetcher, false).await
    }

    /// Refetch `id` with the refresh flag set and overwrite its entry.
    pub async fn refresh<F>(&self, id: &str, fetcher: &F) -> EntityResult<T>
    where
        F: Fetcher<T> + ?Sized,
    {
        info!(cache = self.label, id, "refreshing entry");
        self.load(id, fetcher, true).await
    }

    /// [`ensure`](Self::ensure) every id concurrently. Results come back in
    /// the order of `ids`.
    pub async fn ensure_all<F>(
        &self,
        ids: &[String],
        fetcher: &F,
    ) -> Vec<(String, EntityResult<T>)>
    where
        F: Fetcher<T> + ?Sized,
    {
        let pending = ids.iter().map(|id| async move {
            let result = self.ensure(id, fetcher).await;
            (id.clone(), result)
        });
        join_all(pending).await
    }

    async fn load<F>(&self, id: &str, fetcher: &F, refresh: bool) -> EntityResult<T>
    where
        F: Fetcher<T> + ?Sized,
    {
        let result = match fetcher.fetch(id, refresh).await {
            Ok(data) => EntityResult::Data(data),
            Err(e) => {
                warn!(cache = self.label, id, error = %e, "fetch failed");
                EntityResult::Error(e.to_string())
            }
        };
        self.insert(id, result.clone());
        result
    }
}
