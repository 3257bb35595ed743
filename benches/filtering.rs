use std::collections::HashSet;

use criterion::{Criterion, criterion_group, criterion_main};
use revlens::model::{Coords, Review, Sentiment};
use revlens::pipeline::aggregate::{cluster_stats, scatter_groups};
use revlens::pipeline::filter::{FilterCriteria, SortKey, filtered_indices};
use revlens::windowing::{ListWindow, REVIEW_ROW_HEIGHT};

const REVIEW_COUNT: usize = 50_000;

fn seed_reviews(count: usize) -> Vec<Review> {
    let sentiments = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];
    (0..count)
        .map(|i| Review {
            id: i as i64,
            analysis_id: 1,
            source_id: format!("source-{}", i % 7),
            text: format!("the app keeps crashing on startup, attempt {i}"),
            sentiment: sentiments[i % sentiments.len()],
            confidence: (i % 100) as f32 / 100.0,
            cluster_id: (i % 12) as i64 - 1,
            coords: Some(Coords {
                x: (i % 317) as f32,
                y: (i % 211) as f32,
            }),
        })
        .collect()
}

fn bench_filtered_indices(c: &mut Criterion) {
    let reviews = seed_reviews(REVIEW_COUNT);
    let criteria = FilterCriteria {
        text_query: "crashing".to_string(),
        source_id_query: String::new(),
        sentiments: HashSet::from([Sentiment::Negative]),
    };
    c.bench_function("filtered_indices_50k", |b| {
        b.iter(|| filtered_indices(&reviews, &criteria, SortKey::ConfidenceDesc))
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let reviews = seed_reviews(REVIEW_COUNT);
    c.bench_function("scatter_groups_50k", |b| {
        b.iter(|| scatter_groups(&reviews))
    });
    c.bench_function("cluster_stats_50k", |b| {
        b.iter(|| cluster_stats(&[], &reviews))
    });
}

fn bench_window_slice(c: &mut Criterion) {
    let window = ListWindow::new(REVIEW_COUNT, REVIEW_ROW_HEIGHT);
    c.bench_function("window_slice_50k", |b| {
        b.iter(|| window.slice(1_250_000.0, 900.0))
    });
}

criterion_group!(
    benches,
    bench_filtered_indices,
    bench_aggregation,
    bench_window_slice
);
criterion_main!(benches);
