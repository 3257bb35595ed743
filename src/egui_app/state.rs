//! Shared state types for the egui UI.

use std::collections::HashSet;

use crate::debounce::DebouncedText;
use crate::model::Sentiment;
use crate::pipeline::filter::SortKey;

/// Tabs of the analysis detail view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Reviews,
    Clusters,
    Statistics,
    Map,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Reviews,
        DetailTab::Clusters,
        DetailTab::Statistics,
        DetailTab::Map,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Reviews => "Reviews",
            DetailTab::Clusters => "Clusters",
            DetailTab::Statistics => "Statistics",
            DetailTab::Map => "Map",
        }
    }
}

/// Filter inputs for the review table. Text fields debounce; the sentiment
/// set and sort apply immediately.
#[derive(Clone, Debug, Default)]
pub struct ReviewFilterUi {
    pub text: DebouncedText,
    pub source: DebouncedText,
    pub sentiments: HashSet<Sentiment>,
    pub sort: SortKey,
}

/// Review detail modal: which review is open and whether a mutation for it
/// is in flight (controls stay disabled while one is).
#[derive(Clone, Debug)]
pub struct ReviewModalState {
    pub review_id: i64,
    pub saving: bool,
}

/// Pending destructive confirmation for an analysis delete.
#[derive(Clone, Debug)]
pub struct DeletePrompt {
    pub analysis_id: i64,
    pub filename: String,
}

/// Transient status-bar notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Analysis currently opened in the detail view.
    pub selected_analysis: Option<i64>,
    pub detail_tab: DetailTab,
    pub filters: ReviewFilterUi,
    /// Source restriction for the statistics histogram; `None` = all sources.
    pub selected_source: Option<String>,
    pub review_modal: Option<ReviewModalState>,
    /// Cluster whose summary modal is open.
    pub cluster_modal: Option<i64>,
    pub delete_prompt: Option<DeletePrompt>,
    pub upload_in_progress: bool,
    pub notice: Option<Notice>,
}

impl UiState {
    /// Reset per-analysis view state when switching to another analysis.
    pub fn reset_detail(&mut self) {
        self.detail_tab = DetailTab::default();
        self.filters = ReviewFilterUi::default();
        self.selected_source = None;
        self.review_modal = None;
        self.cluster_modal = None;
    }
}
