//! Single-pass aggregations over a review collection.

use std::collections::BTreeMap;

use egui::Color32;

use crate::model::{Cluster, NOISE_CLUSTER_ID, Review, Sentiment, SentimentStats};

/// Golden-angle hue step, in degrees. Successive ids land far apart on the
/// color wheel without a lookup table.
const GOLDEN_ANGLE_DEG: f32 = 137.508;

/// Per-cluster sentiment counts in ascending cluster-id order.
///
/// Every cluster entity appears, zero-filled when no review references it.
/// Reviews whose `cluster_id` matches no cluster are skipped, not an error.
pub fn cluster_stats(clusters: &[Cluster], reviews: &[Review]) -> BTreeMap<i64, SentimentStats> {
    let mut stats: BTreeMap<i64, SentimentStats> = clusters
        .iter()
        .map(|cluster| (cluster.id, SentimentStats::default()))
        .collect();
    for review in reviews {
        let Some(entry) = stats.get_mut(&review.cluster_id) else {
            continue;
        };
        entry.total += 1;
        match review.sentiment {
            Sentiment::Positive => entry.positive += 1,
            Sentiment::Neutral => entry.neutral += 1,
            Sentiment::Negative => entry.negative += 1,
        }
    }
    stats
}

/// Sentiment counts over the review set, optionally restricted to one
/// source. `None` means all sources.
pub fn source_histogram(reviews: &[Review], source_id: Option<&str>) -> SentimentStats {
    let mut counts = SentimentStats::default();
    for review in reviews {
        if let Some(source) = source_id {
            if review.source_id != source {
                continue;
            }
        }
        counts.total += 1;
        match review.sentiment {
            Sentiment::Positive => counts.positive += 1,
            Sentiment::Neutral => counts.neutral += 1,
            Sentiment::Negative => counts.negative += 1,
        }
    }
    counts
}

/// Distinct source ids, sorted, for the source-selection control.
pub fn distinct_sources(reviews: &[Review]) -> Vec<String> {
    let mut sources: Vec<String> = reviews
        .iter()
        .map(|review| review.source_id.clone())
        .collect();
    sources.sort();
    sources.dedup();
    sources
}

/// A point in the embedding scatter; `review_index` addresses the source
/// slice so tooltips can reach the full record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterPoint {
    pub x: f32,
    pub y: f32,
    pub review_index: usize,
}

/// One scatter series per cluster id.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterGroup {
    pub cluster_id: i64,
    pub points: Vec<ScatterPoint>,
}

/// Group reviews by cluster id for the scatter, skipping reviews without
/// coordinates. Groups come back in ascending id order so series ordering
/// and coloring are deterministic.
pub fn scatter_groups(reviews: &[Review]) -> Vec<ScatterGroup> {
    let mut grouped: BTreeMap<i64, Vec<ScatterPoint>> = BTreeMap::new();
    for (index, review) in reviews.iter().enumerate() {
        let Some(coords) = review.coords else {
            continue;
        };
        grouped.entry(review.cluster_id).or_default().push(ScatterPoint {
            x: coords.x,
            y: coords.y,
            review_index: index,
        });
    }
    grouped
        .into_iter()
        .map(|(cluster_id, points)| ScatterGroup { cluster_id, points })
        .collect()
}

/// Deterministic cluster color: golden-angle hue rotation at fixed
/// saturation/lightness. The noise sentinel always maps to the same
/// desaturated gray, never a hue.
pub fn cluster_color(cluster_id: i64) -> Color32 {
    if cluster_id == NOISE_CLUSTER_ID {
        let (r, g, b) = hsl_to_rgb(0.0, 0.0, 0.30);
        return Color32::from_rgb(r, g, b);
    }
    let hue = (cluster_id as f32 * GOLDEN_ANGLE_DEG).rem_euclid(360.0);
    let (r, g, b) = hsl_to_rgb(hue, 0.70, 0.60);
    Color32::from_rgb(r, g, b)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hh = (h / 60.0) % 6.0;
    let x = c * (1.0 - ((hh % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match hh as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let r = ((r1 + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    let g = ((g1 + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    let b = ((b1 + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coords;

    fn cluster(id: i64) -> Cluster {
        Cluster {
            id,
            analysis_id: 7,
            title: format!("Cluster {id}"),
            summary: String::new(),
        }
    }

    fn review(id: i64, cluster_id: i64, sentiment: Sentiment, coords: Option<(f32, f32)>) -> Review {
        Review {
            id,
            analysis_id: 7,
            source_id: format!("source-{}", id % 2),
            text: "text".into(),
            sentiment,
            confidence: 0.5,
            cluster_id,
            coords: coords.map(|(x, y)| Coords { x, y }),
        }
    }

    #[test]
    fn cluster_stats_counts_in_a_single_pass() {
        let clusters = vec![cluster(0), cluster(1)];
        let reviews = vec![
            review(1, 0, Sentiment::Positive, None),
            review(2, 0, Sentiment::Negative, None),
            review(3, 1, Sentiment::Neutral, None),
        ];
        let stats = cluster_stats(&clusters, &reviews);
        assert_eq!(stats[&0].total, 2);
        assert_eq!(stats[&0].positive, 1);
        assert_eq!(stats[&0].negative, 1);
        assert_eq!(stats[&1].neutral, 1);
    }

    #[test]
    fn reviewless_clusters_appear_zero_filled() {
        let clusters = vec![cluster(0), cluster(5)];
        let stats = cluster_stats(&clusters, &[]);
        assert_eq!(stats[&5], SentimentStats::default());
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn reviews_with_unknown_cluster_are_silently_excluded() {
        let clusters = vec![cluster(0)];
        let reviews = vec![
            review(1, 0, Sentiment::Positive, None),
            review(2, 99, Sentiment::Positive, None),
        ];
        let stats = cluster_stats(&clusters, &reviews);
        let summed: u64 = stats.values().map(|counts| counts.total).sum();
        assert_eq!(summed, 1);
        assert!(summed <= reviews.len() as u64);
    }

    #[test]
    fn cluster_totals_cover_all_reviews_when_every_id_matches() {
        let clusters = vec![cluster(0), cluster(1)];
        let reviews = vec![
            review(1, 0, Sentiment::Positive, None),
            review(2, 1, Sentiment::Negative, None),
            review(3, 1, Sentiment::Neutral, None),
        ];
        let stats = cluster_stats(&clusters, &reviews);
        let summed: u64 = stats.values().map(|counts| counts.total).sum();
        assert_eq!(summed, reviews.len() as u64);
    }

    #[test]
    fn histogram_respects_the_source_filter() {
        let reviews = vec![
            review(1, 0, Sentiment::Positive, None), // source-1
            review(2, 0, Sentiment::Negative, None), // source-0
            review(4, 0, Sentiment::Positive, None), // source-0
        ];
        let all = source_histogram(&reviews, None);
        assert_eq!((all.total, all.positive, all.negative), (3, 2, 1));

        let one = source_histogram(&reviews, Some("source-0"));
        assert_eq!((one.total, one.positive, one.negative), (2, 1, 1));
    }

    #[test]
    fn distinct_sources_are_sorted_and_deduplicated() {
        let reviews = vec![
            review(1, 0, Sentiment::Positive, None),
            review(2, 0, Sentiment::Positive, None),
            review(3, 0, Sentiment::Positive, None),
            review(4, 0, Sentiment::Positive, None),
        ];
        assert_eq!(distinct_sources(&reviews), vec!["source-0", "source-1"]);
    }

    #[test]
    fn scatter_skips_reviews_without_coords_and_orders_groups() {
        let reviews = vec![
            review(1, 3, Sentiment::Positive, Some((1.0, 2.0))),
            review(2, -1, Sentiment::Negative, Some((0.0, 0.0))),
            review(3, 0, Sentiment::Neutral, None),
            review(4, 0, Sentiment::Neutral, Some((5.0, 5.0))),
        ];
        let groups = scatter_groups(&reviews);
        let ids: Vec<i64> = groups.iter().map(|group| group.cluster_id).collect();
        assert_eq!(ids, vec![-1, 0, 3]);
        let total_points: usize = groups.iter().map(|group| group.points.len()).sum();
        assert_eq!(total_points, 3);
        assert_eq!(groups[2].points[0].review_index, 0);
    }

    #[test]
    fn cluster_color_is_pure_and_noise_is_fixed_gray() {
        assert_eq!(cluster_color(4), cluster_color(4));
        let gray = cluster_color(NOISE_CLUSTER_ID);
        assert_eq!(gray, Color32::from_rgb(77, 77, 77));
        for id in 0..64 {
            assert_ne!(cluster_color(id), gray);
        }
    }

    #[test]
    fn nearby_cluster_ids_get_distinct_hues() {
        let colors: Vec<Color32> = (0..12).map(cluster_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
