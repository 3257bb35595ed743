//! In-memory dataset store: the single source of truth per collection.
//!
//! Each cache entry is addressed by a [`DataKey`] (entity kind + scope). The
//! store guarantees at most one in-flight fetch per key, full replacement of
//! the prior value on success, and `Arc`-shared values so every consumer of a
//! key observes the same allocation until the next replacement.
//!
//! The store is an explicit instance owned by the controller and passed by
//! reference; nothing in the crate reaches it through globals. Entries change
//! only through fetch completion or explicit invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Analysis, Cluster, Review};

/// Composable cache address: entity kind plus scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataKey {
    /// The analyses list.
    Analyses,
    /// A single analysis by id.
    Analysis(i64),
    /// Clusters of one analysis.
    Clusters(i64),
    /// Reviews of one analysis.
    Reviews(i64),
    /// A single review by id.
    Review(i64),
}

/// Borrowed view of one entry for consumers.
pub struct QueryView<'a, T> {
    /// Last successfully fetched value, if any. Kept across background
    /// refreshes and failed refetches.
    pub value: Option<&'a Arc<T>>,
    /// Error from the most recent failed fetch, cleared on success.
    pub error: Option<&'a str>,
    /// True only while the *first* fetch for this key is in flight; a
    /// background refresh of an existing value never reports loading.
    pub loading: bool,
}

#[derive(Debug)]
struct Entry<T> {
    value: Option<Arc<T>>,
    error: Option<String>,
    in_flight: bool,
    stale: bool,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
            in_flight: false,
            stale: true,
        }
    }
}

impl<T> Entry<T> {
    fn view(&self) -> QueryView<'_, T> {
        QueryView {
            value: self.value.as_ref(),
            error: self.error.as_deref(),
            loading: self.in_flight && self.value.is_none(),
        }
    }

    fn needs_fetch(&self) -> bool {
        !self.in_flight && (self.stale || self.value.is_none())
    }

    fn begin_fetch(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    fn finish(&mut self, result: Result<T, String>) {
        self.in_flight = false;
        match result {
            Ok(value) => {
                self.value = Some(Arc::new(value));
                self.error = None;
                self.stale = false;
            }
            Err(message) => {
                // Prior data stays usable; only the error surfaces. The key
                // counts as fetched so a persistent failure does not refetch
                // every frame; retry goes through an explicit invalidate.
                self.error = Some(message);
                self.stale = false;
            }
        }
    }

    fn invalidate(&mut self) {
        self.stale = true;
    }
}

/// Keyed cache for every collection the UI consumes.
#[derive(Debug, Default)]
pub struct DatasetStore {
    analyses: Entry<Vec<Analysis>>,
    analysis: HashMap<i64, Entry<Analysis>>,
    clusters: HashMap<i64, Entry<Vec<Cluster>>>,
    reviews: HashMap<i64, Entry<Vec<Review>>>,
    review: HashMap<i64, Entry<Review>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyses(&self) -> QueryView<'_, Vec<Analysis>> {
        self.analyses.view()
    }

    pub fn analysis(&self, id: i64) -> QueryView<'_, Analysis> {
        Self::view_of(&self.analysis, id)
    }

    pub fn clusters(&self, analysis_id: i64) -> QueryView<'_, Vec<Cluster>> {
        Self::view_of(&self.clusters, analysis_id)
    }

    pub fn reviews(&self, analysis_id: i64) -> QueryView<'_, Vec<Review>> {
        Self::view_of(&self.reviews, analysis_id)
    }

    pub fn review(&self, id: i64) -> QueryView<'_, Review> {
        Self::view_of(&self.review, id)
    }

    /// Whether a key has no usable value or was invalidated, and no fetch is
    /// already running for it.
    pub fn needs_fetch(&self, key: DataKey) -> bool {
        match key {
            DataKey::Analyses => self.analyses.needs_fetch(),
            DataKey::Analysis(id) => Self::entry_of(&self.analysis, id, Entry::needs_fetch),
            DataKey::Clusters(id) => Self::entry_of(&self.clusters, id, Entry::needs_fetch),
            DataKey::Reviews(id) => Self::entry_of(&self.reviews, id, Entry::needs_fetch),
            DataKey::Review(id) => Self::entry_of(&self.review, id, Entry::needs_fetch),
        }
    }

    /// Claim the in-flight slot for a key. Returns false when a fetch for the
    /// same key is already running, coalescing concurrent requests.
    pub fn begin_fetch(&mut self, key: DataKey) -> bool {
        match key {
            DataKey::Analyses => self.analyses.begin_fetch(),
            DataKey::Analysis(id) => self.analysis.entry(id).or_default().begin_fetch(),
            DataKey::Clusters(id) => self.clusters.entry(id).or_default().begin_fetch(),
            DataKey::Reviews(id) => self.reviews.entry(id).or_default().begin_fetch(),
            DataKey::Review(id) => self.review.entry(id).or_default().begin_fetch(),
        }
    }

    /// Mark a key stale so the next orchestration pass refetches it. The
    /// current value stays visible until replaced.
    pub fn invalidate(&mut self, key: DataKey) {
        match key {
            DataKey::Analyses => self.analyses.invalidate(),
            DataKey::Analysis(id) => self.analysis.entry(id).or_default().invalidate(),
            DataKey::Clusters(id) => self.clusters.entry(id).or_default().invalidate(),
            DataKey::Reviews(id) => self.reviews.entry(id).or_default().invalidate(),
            DataKey::Review(id) => self.review.entry(id).or_default().invalidate(),
        }
    }

    /// Drop an entry entirely (deleted entities).
    pub fn remove(&mut self, key: DataKey) {
        match key {
            DataKey::Analyses => self.analyses = Entry::default(),
            DataKey::Analysis(id) => {
                self.analysis.remove(&id);
            }
            DataKey::Clusters(id) => {
                self.clusters.remove(&id);
            }
            DataKey::Reviews(id) => {
                self.reviews.remove(&id);
            }
            DataKey::Review(id) => {
                self.review.remove(&id);
            }
        }
    }

    pub fn finish_analyses(&mut self, result: Result<Vec<Analysis>, String>) {
        self.analyses.finish(result);
    }

    pub fn finish_analysis(&mut self, id: i64, result: Result<Analysis, String>) {
        self.analysis.entry(id).or_default().finish(result);
    }

    pub fn finish_clusters(&mut self, analysis_id: i64, result: Result<Vec<Cluster>, String>) {
        self.clusters.entry(analysis_id).or_default().finish(result);
    }

    pub fn finish_reviews(&mut self, analysis_id: i64, result: Result<Vec<Review>, String>) {
        self.reviews.entry(analysis_id).or_default().finish(result);
    }

    pub fn finish_review(&mut self, id: i64, result: Result<Review, String>) {
        self.review.entry(id).or_default().finish(result);
    }

    fn view_of<T>(map: &HashMap<i64, Entry<T>>, id: i64) -> QueryView<'_, T> {
        map.get(&id).map(Entry::view).unwrap_or(QueryView {
            value: None,
            error: None,
            loading: false,
        })
    }

    fn entry_of<T>(
        map: &HashMap<i64, Entry<T>>,
        id: i64,
        probe: impl Fn(&Entry<T>) -> bool,
    ) -> bool {
        map.get(&id).map(&probe).unwrap_or_else(|| probe(&Entry::default()))
    }
}
