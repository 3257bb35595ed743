//! Domain types mirroring the backend wire format.
//!
//! List endpoints wrap payloads in `{ "data": [...] }`; single-entity
//! endpoints return the bare object. Field names are snake_case on the wire.

use serde::{Deserialize, Serialize};

/// Lifecycle of an analysis job. The server owns every transition; the
/// client only ever observes the current value via refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Done,
    Failed,
}

impl Status {
    /// Terminal states never transition again, so polling can stop.
    pub fn is_settled(self) -> bool {
        !matches!(self, Status::Pending)
    }
}

/// Sentiment label attached to a review. The only review field the user
/// may correct after the fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Human-facing label for chips and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// Aggregate counts the server reports once an analysis finishes.
///
/// The `positive + negative + neutral = total` invariant is the server's to
/// uphold; we render the numbers as delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

/// One uploaded CSV and its processing job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub status: Status,
    pub filename: String,
    pub created_at: String,
    pub error: Option<String>,
    /// Present iff `status == Done`.
    pub stats: Option<SentimentStats>,
}

/// A server-computed group of semantically similar reviews.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: i64,
    pub analysis_id: i64,
    pub title: String,
    pub summary: String,
}

/// Reserved cluster id meaning "unclustered/noise". Renders with a fixed
/// desaturated gray, never a hue-mapped color.
pub const NOISE_CLUSTER_ID: i64 = -1;

/// 2-D embedding position of a review.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f32,
    pub y: f32,
}

/// One input text record plus its analysis outputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub analysis_id: i64,
    pub source_id: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub cluster_id: i64,
    /// Absent for reviews the embedding step skipped.
    #[serde(default)]
    pub coords: Option<Coords>,
}

/// Partial update payload for `PATCH /reviews/{id}`.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_deserializes_with_null_stats() {
        let json = r#"{
            "id": 7,
            "status": "pending",
            "filename": "reviews.csv",
            "created_at": "2026-08-01T12:00:00Z",
            "error": null,
            "stats": null
        }"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.status, Status::Pending);
        assert!(analysis.stats.is_none());
        assert!(!analysis.status.is_settled());
    }

    #[test]
    fn done_analysis_carries_stats() {
        let json = r#"{
            "id": 7,
            "status": "done",
            "filename": "reviews.csv",
            "created_at": "2026-08-01T12:00:00Z",
            "error": null,
            "stats": {"total": 150, "positive": 80, "negative": 40, "neutral": 30}
        }"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert!(analysis.status.is_settled());
        assert_eq!(analysis.stats.unwrap().total, 150);
    }

    #[test]
    fn review_tolerates_missing_coords() {
        let json = r#"{
            "id": 1,
            "analysis_id": 7,
            "source_id": "app-store",
            "text": "great",
            "sentiment": "positive",
            "confidence": 0.93,
            "cluster_id": 2
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert!(review.coords.is_none());
    }

    #[test]
    fn review_update_serializes_only_set_fields() {
        let update = ReviewUpdate {
            sentiment: Some(Sentiment::Negative),
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"sentiment":"negative"}"#
        );
        let empty = ReviewUpdate::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }
}
