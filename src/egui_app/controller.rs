//! Orchestration layer between the dataset store, background jobs, the poll
//! schedule, and the UI state.
//!
//! The frame pump runs at the top of every egui frame: worker results are
//! drained (and their invalidations applied) before anything renders, so a
//! read that follows a completed mutation always reflects it. Derived views
//! (filtering, aggregation) are memoized by input identity and recomputed
//! only when the underlying `Arc` or the criteria actually change.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::model::{Review, ReviewUpdate, Sentiment, SentimentStats, Status};
use crate::pipeline::aggregate::{
    ScatterGroup, cluster_stats, distinct_sources, scatter_groups, source_histogram,
};
use crate::pipeline::filter::{FilterCriteria, SortKey, filtered_indices};
use crate::polling::{self, PollSchedule};
use crate::store::{DataKey, DatasetStore};

use super::jobs::{ControllerJobs, JobMessage};
use super::state::{DeletePrompt, Notice, ReviewModalState, UiState};

/// Owns all mutable application state reached from the egui renderer.
pub struct Controller {
    pub store: DatasetStore,
    pub ui: UiState,
    schedule: PollSchedule,
    jobs: ControllerJobs,
    derived: DerivedViews,
}

impl Controller {
    pub fn new(api_url: String) -> Self {
        Self {
            store: DatasetStore::new(),
            ui: UiState::default(),
            schedule: PollSchedule::new(),
            jobs: ControllerJobs::new(api_url),
            derived: DerivedViews::default(),
        }
    }

    pub fn api_url(&self) -> &str {
        self.jobs.base_url()
    }

    /// Frame pump. Message draining precedes everything else so completed
    /// mutations invalidate their dependents before this frame renders.
    pub fn process_frame(&mut self, now: Instant) {
        while let Ok(message) = self.jobs.try_recv_message() {
            self.handle_message(message, now);
        }
        self.settle_filter_inputs(now);
        for key in self.poll_due(now) {
            self.request_fetch(key);
        }
        for key in self.required_keys() {
            if self.store.needs_fetch(key) {
                self.request_fetch(key);
            }
        }
    }

    /// Earliest instant at which a timer needs servicing, for scheduling the
    /// next repaint.
    pub fn next_wakeup(&self) -> Option<Instant> {
        [
            self.schedule.next_deadline(),
            self.ui.filters.text.pending_deadline(),
            self.ui.filters.source.pending_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Poll deadlines that have elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Vec<DataKey> {
        self.schedule.take_due(now)
    }

    /// Claim the in-flight slot for a key without spawning a worker. The
    /// production pump pairs this with a spawn; tests drive it directly.
    pub fn claim_fetch(&mut self, key: DataKey) -> bool {
        self.store.begin_fetch(key)
    }

    fn request_fetch(&mut self, key: DataKey) {
        if self.claim_fetch(key) {
            self.jobs.spawn_fetch(key);
        }
    }

    /// Cache keys the currently visible views depend on.
    fn required_keys(&self) -> Vec<DataKey> {
        let mut keys = vec![DataKey::Analyses];
        if let Some(id) = self.ui.selected_analysis {
            keys.push(DataKey::Analysis(id));
            keys.push(DataKey::Clusters(id));
            keys.push(DataKey::Reviews(id));
        }
        if let Some(modal) = &self.ui.review_modal {
            keys.push(DataKey::Review(modal.review_id));
        }
        keys
    }

    fn settle_filter_inputs(&mut self, now: Instant) {
        // The filter memo notices the applied-value change on next access.
        self.ui.filters.text.settle(now);
        self.ui.filters.source.settle(now);
    }

    /// Apply one worker result: store update, dependent invalidations, and
    /// poll re-arming derived from the freshly observed status.
    pub fn handle_message(&mut self, message: JobMessage, now: Instant) {
        match message {
            JobMessage::AnalysesFetched(result) => {
                if let Err(err) = &result {
                    tracing::warn!("Analyses refresh failed: {err}");
                }
                self.store
                    .finish_analyses(result.map_err(|err| err.to_string()));
                let interval = self
                    .store
                    .analyses()
                    .value
                    .and_then(|list| polling::list_poll_interval(list));
                self.schedule.arm(DataKey::Analyses, interval, now);
            }
            JobMessage::AnalysisFetched { id, result } => {
                if let Err(err) = &result {
                    tracing::warn!("Analysis {id} refresh failed: {err}");
                }
                let was_pending = self
                    .store
                    .analysis(id)
                    .value
                    .is_some_and(|analysis| analysis.status == Status::Pending);
                self.store
                    .finish_analysis(id, result.map_err(|err| err.to_string()));
                let now_settled = self
                    .store
                    .analysis(id)
                    .value
                    .is_some_and(|analysis| analysis.status.is_settled());
                if was_pending && now_settled {
                    // Processing finished; clusters and reviews exist now.
                    self.store.invalidate(DataKey::Clusters(id));
                    self.store.invalidate(DataKey::Reviews(id));
                }
                let interval = if self.ui.selected_analysis == Some(id) {
                    self.store
                        .analysis(id)
                        .value
                        .and_then(|analysis| polling::detail_poll_interval(analysis))
                } else {
                    None
                };
                self.schedule.arm(DataKey::Analysis(id), interval, now);
            }
            JobMessage::ClustersFetched {
                analysis_id,
                result,
            } => {
                self.store
                    .finish_clusters(analysis_id, result.map_err(|err| err.to_string()));
            }
            JobMessage::ReviewsFetched {
                analysis_id,
                result,
            } => {
                self.store
                    .finish_reviews(analysis_id, result.map_err(|err| err.to_string()));
            }
            JobMessage::ReviewFetched { id, result } => {
                self.store
                    .finish_review(id, result.map_err(|err| err.to_string()));
            }
            JobMessage::AnalysisCreated(result) => {
                self.ui.upload_in_progress = false;
                match result {
                    Ok(analysis) => {
                        tracing::info!(
                            "Uploaded {} as analysis {}",
                            analysis.filename,
                            analysis.id
                        );
                        self.store.invalidate(DataKey::Analyses);
                        self.select_analysis(Some(analysis.id));
                        self.ui.notice =
                            Some(Notice::Info(format!("Uploaded {}", analysis.filename)));
                    }
                    Err(err) => {
                        tracing::warn!("Upload failed: {err}");
                        self.ui.notice = Some(Notice::Error(format!("Upload failed: {err}")));
                    }
                }
            }
            JobMessage::AnalysisDeleted { id, result } => match result {
                Ok(()) => {
                    self.store.invalidate(DataKey::Analyses);
                    self.store.remove(DataKey::Analysis(id));
                    self.store.remove(DataKey::Clusters(id));
                    self.store.remove(DataKey::Reviews(id));
                    self.schedule.cancel(DataKey::Analysis(id));
                    if self.ui.selected_analysis == Some(id) {
                        self.select_analysis(None);
                    }
                    self.ui.notice = Some(Notice::Info("Analysis deleted".into()));
                }
                Err(err) => {
                    tracing::warn!("Delete of analysis {id} failed: {err}");
                    self.ui.notice = Some(Notice::Error(format!("Delete failed: {err}")));
                }
            },
            JobMessage::ReviewUpdated {
                id,
                analysis_id,
                result,
            } => {
                if let Some(modal) = &mut self.ui.review_modal {
                    if modal.review_id == id {
                        modal.saving = false;
                    }
                }
                match result {
                    Ok(review) => {
                        self.store.invalidate(DataKey::Review(review.id));
                        self.store.invalidate(DataKey::Reviews(review.analysis_id));
                    }
                    Err(err) => {
                        // Prior cached data stays untouched on failure.
                        tracing::warn!("Update of review {id} ({analysis_id}) failed: {err}");
                        self.ui.notice = Some(Notice::Error(format!("Save failed: {err}")));
                    }
                }
            }
            JobMessage::ReviewDeleted {
                id,
                analysis_id,
                result,
            } => match result {
                Ok(()) => {
                    if self
                        .ui
                        .review_modal
                        .as_ref()
                        .is_some_and(|modal| modal.review_id == id)
                    {
                        self.ui.review_modal = None;
                    }
                    self.store.invalidate(DataKey::Reviews(analysis_id));
                    self.store.remove(DataKey::Review(id));
                }
                Err(err) => {
                    if let Some(modal) = &mut self.ui.review_modal {
                        if modal.review_id == id {
                            modal.saving = false;
                        }
                    }
                    tracing::warn!("Delete of review {id} failed: {err}");
                    self.ui.notice = Some(Notice::Error(format!("Delete failed: {err}")));
                }
            },
        }
    }

    /// Open an analysis in the detail view; `None` returns to the list.
    /// Poll deadlines of the previous detail are cancelled so nothing fires
    /// against a view that is gone.
    pub fn select_analysis(&mut self, id: Option<i64>) {
        if let Some(previous) = self.ui.selected_analysis {
            if Some(previous) != id {
                self.schedule.cancel(DataKey::Analysis(previous));
            }
        }
        self.ui.selected_analysis = id;
        self.ui.reset_detail();
        self.derived = DerivedViews::default();
    }

    /// Pick a CSV with the native file dialog and start the upload.
    pub fn upload_via_dialog(&mut self) {
        if self.ui.upload_in_progress {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reviews.csv".to_string());
        match std::fs::read(&path) {
            Ok(contents) => self.begin_upload(filename, contents),
            Err(err) => {
                tracing::warn!("Could not read {}: {err}", path.display());
                self.ui.notice = Some(Notice::Error(format!("Could not read file: {err}")));
            }
        }
    }

    /// Export the current analysis's reviews as a labelled CSV via a native
    /// save dialog.
    pub fn export_csv_via_dialog(&mut self, analysis_id: i64) {
        let Some(reviews) = self.store.reviews(analysis_id).value.cloned() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(crate::export::export_file_name(analysis_id))
            .save_file()
        else {
            return;
        };
        let csv = crate::export::reviews_to_csv(&reviews);
        match std::fs::write(&path, csv) {
            Ok(()) => {
                self.ui.notice = Some(Notice::Info(format!("Exported to {}", path.display())));
            }
            Err(err) => {
                tracing::warn!("Export to {} failed: {err}", path.display());
                self.ui.notice = Some(Notice::Error(format!("Export failed: {err}")));
            }
        }
    }

    pub fn begin_upload(&mut self, filename: String, contents: Vec<u8>) {
        if self.ui.upload_in_progress {
            return;
        }
        self.ui.upload_in_progress = true;
        self.jobs.spawn_upload(filename, contents);
    }

    pub fn prompt_delete_analysis(&mut self, analysis_id: i64, filename: String) {
        self.ui.delete_prompt = Some(DeletePrompt {
            analysis_id,
            filename,
        });
    }

    pub fn confirm_delete_analysis(&mut self) {
        if let Some(prompt) = self.ui.delete_prompt.take() {
            self.jobs.spawn_delete_analysis(prompt.analysis_id);
        }
    }

    pub fn open_review_modal(&mut self, review_id: i64) {
        self.ui.review_modal = Some(ReviewModalState {
            review_id,
            saving: false,
        });
    }

    /// Correct a review's sentiment. No optimistic write: the cache changes
    /// only after the server confirms; the modal's controls stay disabled
    /// while the PATCH is in flight.
    pub fn update_review_sentiment(&mut self, id: i64, analysis_id: i64, sentiment: Sentiment) {
        let Some(modal) = &mut self.ui.review_modal else {
            return;
        };
        if modal.saving {
            return;
        }
        modal.saving = true;
        self.jobs.spawn_update_review(
            id,
            analysis_id,
            ReviewUpdate {
                sentiment: Some(sentiment),
            },
        );
    }

    pub fn delete_review(&mut self, id: i64, analysis_id: i64) {
        let Some(modal) = &mut self.ui.review_modal else {
            return;
        };
        if modal.saving {
            return;
        }
        modal.saving = true;
        self.jobs.spawn_delete_review(id, analysis_id);
    }

    /// Retry button on an error panel: mark the key stale; the next pump
    /// refetches it.
    pub fn retry(&mut self, key: DataKey) {
        self.store.invalidate(key);
    }

    /// Filtered, sorted review rows for the table, memoized by input
    /// identity and criteria.
    pub fn filtered_reviews(&mut self, analysis_id: i64) -> Option<FilteredReviews> {
        let reviews = Arc::clone(self.store.reviews(analysis_id).value?);
        let criteria = FilterCriteria {
            text_query: self.ui.filters.text.applied().to_string(),
            source_id_query: self.ui.filters.source.applied().to_string(),
            sentiments: self.ui.filters.sentiments.clone(),
        };
        let sort = self.ui.filters.sort;
        if let Some(memo) = &self.derived.filter {
            if Arc::ptr_eq(&memo.reviews, &reviews)
                && memo.criteria == criteria
                && memo.sort == sort
            {
                return Some(FilteredReviews {
                    reviews,
                    indices: Arc::clone(&memo.indices),
                });
            }
        }
        let indices = Arc::new(filtered_indices(&reviews, &criteria, sort));
        self.derived.filter = Some(FilterMemo {
            reviews: Arc::clone(&reviews),
            criteria,
            sort,
            indices: Arc::clone(&indices),
        });
        Some(FilteredReviews { reviews, indices })
    }

    /// Per-cluster sentiment stats, memoized on both input collections.
    pub fn cluster_stats(&mut self, analysis_id: i64) -> Option<Arc<BTreeMap<i64, SentimentStats>>> {
        let clusters = Arc::clone(self.store.clusters(analysis_id).value?);
        let reviews = Arc::clone(self.store.reviews(analysis_id).value?);
        if let Some(memo) = &self.derived.cluster_stats {
            if Arc::ptr_eq(&memo.clusters, &clusters) && Arc::ptr_eq(&memo.reviews, &reviews) {
                return Some(Arc::clone(&memo.stats));
            }
        }
        let stats = Arc::new(cluster_stats(&clusters, &reviews));
        self.derived.cluster_stats = Some(ClusterStatsMemo {
            clusters,
            reviews,
            stats: Arc::clone(&stats),
        });
        Some(stats)
    }

    /// Scatter series, memoized on the review collection.
    pub fn scatter(&mut self, analysis_id: i64) -> Option<Arc<Vec<ScatterGroup>>> {
        let reviews = Arc::clone(self.store.reviews(analysis_id).value?);
        if let Some(memo) = &self.derived.scatter {
            if Arc::ptr_eq(&memo.reviews, &reviews) {
                return Some(Arc::clone(&memo.groups));
            }
        }
        let groups = Arc::new(scatter_groups(&reviews));
        self.derived.scatter = Some(ScatterMemo {
            reviews,
            groups: Arc::clone(&groups),
        });
        Some(groups)
    }

    /// Distinct source ids for the statistics selector, memoized on the
    /// review collection.
    pub fn sources(&mut self, analysis_id: i64) -> Option<Arc<Vec<String>>> {
        let reviews = Arc::clone(self.store.reviews(analysis_id).value?);
        if let Some(memo) = &self.derived.sources {
            if Arc::ptr_eq(&memo.reviews, &reviews) {
                return Some(Arc::clone(&memo.sources));
            }
        }
        let sources = Arc::new(distinct_sources(&reviews));
        self.derived.sources = Some(SourcesMemo {
            reviews,
            sources: Arc::clone(&sources),
        });
        Some(sources)
    }

    /// Sentiment histogram for the selected source, memoized on the review
    /// collection plus the selection.
    pub fn histogram(&mut self, analysis_id: i64) -> Option<SentimentStats> {
        let reviews = Arc::clone(self.store.reviews(analysis_id).value?);
        let source = self.ui.selected_source.clone();
        if let Some(memo) = &self.derived.histogram {
            if Arc::ptr_eq(&memo.reviews, &reviews) && memo.source == source {
                return Some(memo.counts);
            }
        }
        let counts = source_histogram(&reviews, source.as_deref());
        self.derived.histogram = Some(HistogramMemo {
            reviews,
            source,
            counts,
        });
        Some(counts)
    }
}

/// A review collection plus display-order indices into it.
pub struct FilteredReviews {
    pub reviews: Arc<Vec<Review>>,
    pub indices: Arc<Vec<usize>>,
}

impl FilteredReviews {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn row(&self, display_index: usize) -> Option<&Review> {
        self.indices
            .get(display_index)
            .and_then(|&index| self.reviews.get(index))
    }
}

#[derive(Default)]
struct DerivedViews {
    filter: Option<FilterMemo>,
    cluster_stats: Option<ClusterStatsMemo>,
    scatter: Option<ScatterMemo>,
    sources: Option<SourcesMemo>,
    histogram: Option<HistogramMemo>,
}

struct FilterMemo {
    reviews: Arc<Vec<Review>>,
    criteria: FilterCriteria,
    sort: SortKey,
    indices: Arc<Vec<usize>>,
}

struct ClusterStatsMemo {
    clusters: Arc<Vec<crate::model::Cluster>>,
    reviews: Arc<Vec<Review>>,
    stats: Arc<BTreeMap<i64, SentimentStats>>,
}

struct ScatterMemo {
    reviews: Arc<Vec<Review>>,
    groups: Arc<Vec<ScatterGroup>>,
}

struct SourcesMemo {
    reviews: Arc<Vec<Review>>,
    sources: Arc<Vec<String>>,
}

struct HistogramMemo {
    reviews: Arc<Vec<Review>>,
    source: Option<String>,
    counts: SentimentStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{Analysis, Coords};
    use std::time::Duration;

    fn controller() -> Controller {
        Controller::new("http://127.0.0.1:9".into())
    }

    fn analysis(id: i64, status: Status) -> Analysis {
        Analysis {
            id,
            status,
            filename: "reviews.csv".into(),
            created_at: "2026-08-01T00:00:00Z".into(),
            error: None,
            stats: None,
        }
    }

    fn review(id: i64, analysis_id: i64, sentiment: Sentiment, confidence: f32) -> Review {
        Review {
            id,
            analysis_id,
            source_id: "web".into(),
            text: format!("review {id}"),
            sentiment,
            confidence,
            cluster_id: 0,
            coords: Some(Coords { x: 0.0, y: 0.0 }),
        }
    }

    #[test]
    fn pending_detail_rearms_at_one_second() {
        let now = Instant::now();
        let mut controller = controller();
        controller.select_analysis(Some(4));
        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Ok(analysis(4, Status::Pending)),
            },
            now,
        );
        assert!(controller.poll_due(now + Duration::from_millis(999)).is_empty());
        assert_eq!(
            controller.poll_due(now + Duration::from_millis(1000)),
            vec![DataKey::Analysis(4)]
        );
    }

    #[test]
    fn settled_detail_stops_polling_and_refreshes_children() {
        let now = Instant::now();
        let mut controller = controller();
        controller.select_analysis(Some(4));
        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Ok(analysis(4, Status::Pending)),
            },
            now,
        );
        // Children fetched while pending come back empty.
        controller.claim_fetch(DataKey::Reviews(4));
        controller.handle_message(
            JobMessage::ReviewsFetched {
                analysis_id: 4,
                result: Ok(Vec::new()),
            },
            now,
        );
        assert!(!controller.store.needs_fetch(DataKey::Reviews(4)));

        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Ok(analysis(4, Status::Done)),
            },
            now,
        );
        assert!(controller.poll_due(now + Duration::from_secs(60)).is_empty());
        // The settle invalidated the children so real data loads now.
        assert!(controller.store.needs_fetch(DataKey::Reviews(4)));
        assert!(controller.store.needs_fetch(DataKey::Clusters(4)));
    }

    #[test]
    fn failed_detail_refresh_keeps_polling_from_last_known_status() {
        let now = Instant::now();
        let mut controller = controller();
        controller.select_analysis(Some(4));
        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Ok(analysis(4, Status::Pending)),
            },
            now,
        );
        let _ = controller.poll_due(now + Duration::from_millis(1000));
        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Err(ApiError::Status { code: 500 }),
            },
            now + Duration::from_millis(1100),
        );
        // Last known status is still pending, so the cadence continues.
        assert_eq!(
            controller.poll_due(now + Duration::from_millis(2100)),
            vec![DataKey::Analysis(4)]
        );
        assert!(controller.store.analysis(4).error.is_some());
    }

    #[test]
    fn list_polls_only_while_something_is_pending() {
        let now = Instant::now();
        let mut controller = controller();
        controller.claim_fetch(DataKey::Analyses);
        controller.handle_message(
            JobMessage::AnalysesFetched(Ok(vec![
                analysis(1, Status::Done),
                analysis(2, Status::Pending),
            ])),
            now,
        );
        assert_eq!(
            controller.poll_due(now + Duration::from_millis(5000)),
            vec![DataKey::Analyses]
        );

        controller.claim_fetch(DataKey::Analyses);
        controller.handle_message(
            JobMessage::AnalysesFetched(Ok(vec![
                analysis(1, Status::Done),
                analysis(2, Status::Done),
            ])),
            now,
        );
        assert!(controller.poll_due(now + Duration::from_secs(600)).is_empty());
    }

    #[test]
    fn review_update_invalidates_detail_and_parent_list() {
        let now = Instant::now();
        let mut controller = controller();
        controller.claim_fetch(DataKey::Reviews(7));
        controller.handle_message(
            JobMessage::ReviewsFetched {
                analysis_id: 7,
                result: Ok(vec![review(1, 7, Sentiment::Positive, 0.9)]),
            },
            now,
        );
        controller.open_review_modal(1);
        controller.update_review_sentiment(1, 7, Sentiment::Negative);
        assert!(controller.ui.review_modal.as_ref().unwrap().saving);

        let mut updated = review(1, 7, Sentiment::Negative, 0.9);
        updated.sentiment = Sentiment::Negative;
        controller.handle_message(
            JobMessage::ReviewUpdated {
                id: 1,
                analysis_id: 7,
                result: Ok(updated),
            },
            now,
        );
        assert!(!controller.ui.review_modal.as_ref().unwrap().saving);
        assert!(controller.store.needs_fetch(DataKey::Reviews(7)));
        assert!(controller.store.needs_fetch(DataKey::Review(1)));
    }

    #[test]
    fn failed_mutation_leaves_caches_untouched() {
        let now = Instant::now();
        let mut controller = controller();
        controller.claim_fetch(DataKey::Reviews(7));
        controller.handle_message(
            JobMessage::ReviewsFetched {
                analysis_id: 7,
                result: Ok(vec![review(1, 7, Sentiment::Positive, 0.9)]),
            },
            now,
        );
        controller.open_review_modal(1);
        controller.update_review_sentiment(1, 7, Sentiment::Negative);
        controller.handle_message(
            JobMessage::ReviewUpdated {
                id: 1,
                analysis_id: 7,
                result: Err(ApiError::Transport("connection refused".into())),
            },
            now,
        );
        // Control re-enables, nothing was invalidated, an error surfaced.
        assert!(!controller.ui.review_modal.as_ref().unwrap().saving);
        assert!(!controller.store.needs_fetch(DataKey::Reviews(7)));
        assert!(matches!(controller.ui.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn review_delete_invalidates_list_and_drops_detail() {
        let now = Instant::now();
        let mut controller = controller();
        controller.claim_fetch(DataKey::Reviews(7));
        controller.handle_message(
            JobMessage::ReviewsFetched {
                analysis_id: 7,
                result: Ok(vec![review(1, 7, Sentiment::Positive, 0.9)]),
            },
            now,
        );
        controller.open_review_modal(1);
        controller.delete_review(1, 7);
        controller.handle_message(
            JobMessage::ReviewDeleted {
                id: 1,
                analysis_id: 7,
                result: Ok(()),
            },
            now,
        );
        assert!(controller.ui.review_modal.is_none());
        assert!(controller.store.needs_fetch(DataKey::Reviews(7)));
        assert!(controller.store.review(1).value.is_none());
    }

    #[test]
    fn filter_memo_reuses_indices_until_inputs_change() {
        let now = Instant::now();
        let mut controller = controller();
        controller.select_analysis(Some(7));
        controller.claim_fetch(DataKey::Reviews(7));
        controller.handle_message(
            JobMessage::ReviewsFetched {
                analysis_id: 7,
                result: Ok(vec![
                    review(1, 7, Sentiment::Positive, 0.9),
                    review(2, 7, Sentiment::Negative, 0.4),
                ]),
            },
            now,
        );
        let first = controller.filtered_reviews(7).unwrap();
        let second = controller.filtered_reviews(7).unwrap();
        assert!(Arc::ptr_eq(&first.indices, &second.indices));

        controller.ui.filters.sort = SortKey::ConfidenceAsc;
        let third = controller.filtered_reviews(7).unwrap();
        assert!(!Arc::ptr_eq(&first.indices, &third.indices));
        assert_eq!(third.row(0).unwrap().id, 2);
    }

    #[test]
    fn selecting_another_analysis_cancels_detail_polling() {
        let now = Instant::now();
        let mut controller = controller();
        controller.select_analysis(Some(4));
        controller.claim_fetch(DataKey::Analysis(4));
        controller.handle_message(
            JobMessage::AnalysisFetched {
                id: 4,
                result: Ok(analysis(4, Status::Pending)),
            },
            now,
        );
        controller.select_analysis(None);
        assert!(controller.poll_due(now + Duration::from_secs(60)).is_empty());
    }
}
