//! Review filtering and sorting.
//!
//! `filtered_indices` is a pure function of its arguments: it never mutates
//! the input slice and returns a fresh ordered index sequence into it. All
//! criteria compose with logical AND; the confidence sort is stable, so rows
//! with equal confidence keep their relative input order.

use std::collections::HashSet;

use crate::model::{Review, Sentiment};

/// Sort orders offered by the review table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    ConfidenceDesc,
    ConfidenceAsc,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::ConfidenceDesc => "Confidence (high to low)",
            SortKey::ConfidenceAsc => "Confidence (low to high)",
        }
    }
}

/// Filter criteria, already debounced by the input layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against `text`.
    pub text_query: String,
    /// Case-insensitive substring match against `source_id`.
    pub source_id_query: String,
    /// Allowed sentiments; empty means no sentiment filtering.
    pub sentiments: HashSet<Sentiment>,
}

impl FilterCriteria {
    fn matches(&self, review: &Review, text_query: &str, source_query: &str) -> bool {
        if !text_query.is_empty() && !review.text.to_lowercase().contains(text_query) {
            return false;
        }
        if !source_query.is_empty() && !review.source_id.to_lowercase().contains(source_query) {
            return false;
        }
        if !self.sentiments.is_empty() && !self.sentiments.contains(&review.sentiment) {
            return false;
        }
        true
    }
}

/// Apply criteria and sort, returning indices into `reviews` in display
/// order. O(n log n); the input is untouched.
pub fn filtered_indices(
    reviews: &[Review],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<usize> {
    let text_query = criteria.text_query.to_lowercase();
    let source_query = criteria.source_id_query.to_lowercase();

    let mut indices: Vec<usize> = reviews
        .iter()
        .enumerate()
        .filter(|(_, review)| criteria.matches(review, &text_query, &source_query))
        .map(|(index, _)| index)
        .collect();

    // Vec::sort_by is stable; equal confidences keep input order.
    match sort {
        SortKey::ConfidenceDesc => {
            indices.sort_by(|&a, &b| reviews[b].confidence.total_cmp(&reviews[a].confidence));
        }
        SortKey::ConfidenceAsc => {
            indices.sort_by(|&a, &b| reviews[a].confidence.total_cmp(&reviews[b].confidence));
        }
    }
    indices
}
