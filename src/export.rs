//! CSV export of the current review collection.
//!
//! Pure transform, no I/O: two columns `ID,label`, where `ID` carries the
//! review's source id and the label is the numeric sentiment encoding the
//! training pipeline expects (negative 0.0, neutral 1.0, positive 2.0).

use crate::model::{Review, Sentiment};

/// Numeric label for a sentiment class.
pub fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Negative => "0.0",
        Sentiment::Neutral => "1.0",
        Sentiment::Positive => "2.0",
    }
}

/// Render the reviews as labeled CSV text.
pub fn reviews_to_csv(reviews: &[Review]) -> String {
    let mut out = String::with_capacity(16 + reviews.len() * 16);
    out.push_str("ID,label");
    for review in reviews {
        out.push('\n');
        out.push_str(&review.source_id);
        out.push(',');
        out.push_str(sentiment_label(review.sentiment));
    }
    out
}

/// Default filename for a saved export.
pub fn export_file_name(analysis_id: i64) -> String {
    format!("analysis_{analysis_id}.csv")
}
