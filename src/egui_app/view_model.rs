//! Helpers to convert domain data into egui-facing display values.

use crate::model::{Analysis, Cluster, Review, Sentiment, SentimentStats, Status};

/// Row for the analyses list.
pub struct AnalysisRowView {
    pub id: i64,
    pub filename: String,
    pub created_at: String,
    pub status: Status,
    pub status_label: &'static str,
    pub total_reviews: Option<u64>,
    pub error: Option<String>,
}

pub fn analysis_rows(analyses: &[Analysis]) -> Vec<AnalysisRowView> {
    analyses
        .iter()
        .map(|analysis| AnalysisRowView {
            id: analysis.id,
            filename: analysis.filename.clone(),
            created_at: created_at_label(&analysis.created_at),
            status: analysis.status,
            status_label: status_label(analysis.status),
            total_reviews: analysis.stats.as_ref().map(|stats| stats.total),
            error: analysis.error.clone(),
        })
        .collect()
}

pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Pending => "Processing",
        Status::Done => "Done",
        Status::Failed => "Failed",
    }
}

/// The server sends RFC 3339 timestamps; the date and minute are enough for
/// the list.
pub fn created_at_label(created_at: &str) -> String {
    let trimmed = created_at.trim_end_matches('Z');
    match trimmed.split_once('T') {
        Some((date, time)) => {
            let minutes = time.rsplit_once(':').map_or(time, |(rest, _)| rest);
            format!("{date} {minutes}")
        }
        None => trimmed.to_string(),
    }
}

/// Confidence rendered as a percentage with no decimals.
pub fn confidence_label(confidence: f32) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// One-line preview of a review for the table; full text lives in the modal.
pub fn review_preview(review: &Review, max_chars: usize) -> String {
    let line = review.text.lines().next().unwrap_or("");
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars).collect();
    format!("{cut}…")
}

/// Header for a cluster card; noise gets a fixed label.
pub fn cluster_title(cluster: &Cluster) -> String {
    if cluster.id == crate::model::NOISE_CLUSTER_ID {
        "Unclustered".to_string()
    } else if cluster.title.is_empty() {
        format!("Cluster {}", cluster.id)
    } else {
        cluster.title.clone()
    }
}

/// Share of one sentiment within a stats bucket, in percent.
pub fn sentiment_share(stats: &SentimentStats, sentiment: Sentiment) -> f32 {
    if stats.total == 0 {
        return 0.0;
    }
    let count = match sentiment {
        Sentiment::Positive => stats.positive,
        Sentiment::Neutral => stats.neutral,
        Sentiment::Negative => stats.negative,
    };
    count as f32 / stats.total as f32 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NOISE_CLUSTER_ID;

    #[test]
    fn created_at_drops_seconds_and_zone() {
        assert_eq!(
            created_at_label("2026-08-01T14:03:22Z"),
            "2026-08-01 14:03"
        );
        assert_eq!(created_at_label("2026-08-01"), "2026-08-01");
    }

    #[test]
    fn confidence_renders_as_percent() {
        assert_eq!(confidence_label(0.876), "88%");
        assert_eq!(confidence_label(0.0), "0%");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let review = Review {
            id: 1,
            analysis_id: 1,
            source_id: "web".into(),
            text: "éàü long review text".into(),
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
            cluster_id: 0,
            coords: None,
        };
        assert_eq!(review_preview(&review, 5), "éàü l…");
        assert_eq!(review_preview(&review, 100), "éàü long review text");
    }

    #[test]
    fn cluster_titles_handle_noise_and_empty() {
        let noise = Cluster {
            id: NOISE_CLUSTER_ID,
            analysis_id: 1,
            title: "ignored".into(),
            summary: String::new(),
        };
        assert_eq!(cluster_title(&noise), "Unclustered");
        let untitled = Cluster {
            id: 3,
            analysis_id: 1,
            title: String::new(),
            summary: String::new(),
        };
        assert_eq!(cluster_title(&untitled), "Cluster 3");
    }

    #[test]
    fn sentiment_share_divides_by_total() {
        let stats = SentimentStats {
            total: 200,
            positive: 50,
            negative: 100,
            neutral: 50,
        };
        assert_eq!(sentiment_share(&stats, Sentiment::Negative), 50.0);
        let empty = SentimentStats::default();
        assert_eq!(sentiment_share(&empty, Sentiment::Positive), 0.0);
    }
}
