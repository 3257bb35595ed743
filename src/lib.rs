//! Library exports for reuse in benchmarks and tests.
/// HTTP client for the analysis backend.
pub mod api;
/// Application config directory helpers.
pub mod app_dirs;
/// Settings loading and validation.
pub mod config;
/// Quiet-period debounce for filter inputs.
pub mod debounce;
/// Shared egui UI modules.
pub mod egui_app;
/// Labelled CSV export of review datasets.
pub mod export;
pub(crate) mod http_client;
/// Log file setup and pruning.
pub mod logging;
/// Domain types shared across the app.
pub mod model;
/// Pure filtering, sorting and aggregation over review datasets.
pub mod pipeline;
/// Poll cadence tracking for pending analyses.
pub mod polling;
/// Keyed in-memory cache of server data.
pub mod store;
/// Windowed list math for large tables.
pub mod windowing;
