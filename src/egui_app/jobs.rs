//! Background fetch and mutation jobs.
//!
//! Every backend call runs on its own worker thread and reports back over a
//! single mpsc channel the controller drains once per frame. The UI thread
//! never blocks on the network.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{self, ApiError};
use crate::model::{Analysis, Cluster, Review, ReviewUpdate};
use crate::store::DataKey;

/// Results delivered to the controller.
#[derive(Debug)]
pub enum JobMessage {
    AnalysesFetched(Result<Vec<Analysis>, ApiError>),
    AnalysisFetched {
        id: i64,
        result: Result<Analysis, ApiError>,
    },
    ClustersFetched {
        analysis_id: i64,
        result: Result<Vec<Cluster>, ApiError>,
    },
    ReviewsFetched {
        analysis_id: i64,
        result: Result<Vec<Review>, ApiError>,
    },
    ReviewFetched {
        id: i64,
        result: Result<Review, ApiError>,
    },
    AnalysisCreated(Result<Analysis, ApiError>),
    AnalysisDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    ReviewUpdated {
        id: i64,
        analysis_id: i64,
        result: Result<Review, ApiError>,
    },
    ReviewDeleted {
        id: i64,
        analysis_id: i64,
        result: Result<(), ApiError>,
    },
}

/// Owns the worker channel endpoints and the backend base URL.
pub struct ControllerJobs {
    base_url: String,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
}

impl ControllerJobs {
    pub fn new(base_url: String) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            base_url,
            message_tx,
            message_rx,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Spawn the fetch matching a cache key.
    pub fn spawn_fetch(&self, key: DataKey) {
        let tx = self.message_tx.clone();
        let base = self.base_url.clone();
        thread::spawn(move || {
            let message = match key {
                DataKey::Analyses => JobMessage::AnalysesFetched(api::analyses::list(&base)),
                DataKey::Analysis(id) => JobMessage::AnalysisFetched {
                    id,
                    result: api::analyses::get(&base, id),
                },
                DataKey::Clusters(analysis_id) => JobMessage::ClustersFetched {
                    analysis_id,
                    result: api::clusters::list(&base, analysis_id),
                },
                DataKey::Reviews(analysis_id) => JobMessage::ReviewsFetched {
                    analysis_id,
                    result: api::reviews::list(&base, analysis_id),
                },
                DataKey::Review(id) => JobMessage::ReviewFetched {
                    id,
                    result: api::reviews::get(&base, id),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Upload a CSV, creating a new pending analysis.
    pub fn spawn_upload(&self, filename: String, contents: Vec<u8>) {
        let tx = self.message_tx.clone();
        let base = self.base_url.clone();
        thread::spawn(move || {
            let result = api::analyses::create(&base, &filename, &contents);
            let _ = tx.send(JobMessage::AnalysisCreated(result));
        });
    }

    pub fn spawn_delete_analysis(&self, id: i64) {
        let tx = self.message_tx.clone();
        let base = self.base_url.clone();
        thread::spawn(move || {
            let result = api::analyses::delete(&base, id);
            let _ = tx.send(JobMessage::AnalysisDeleted { id, result });
        });
    }

    pub fn spawn_update_review(&self, id: i64, analysis_id: i64, update: ReviewUpdate) {
        let tx = self.message_tx.clone();
        let base = self.base_url.clone();
        thread::spawn(move || {
            let result = api::reviews::update(&base, id, &update);
            let _ = tx.send(JobMessage::ReviewUpdated {
                id,
                analysis_id,
                result,
            });
        });
    }

    pub fn spawn_delete_review(&self, id: i64, analysis_id: i64) {
        let tx = self.message_tx.clone();
        let base = self.base_url.clone();
        thread::spawn(move || {
            let result = api::reviews::delete(&base, id);
            let _ = tx.send(JobMessage::ReviewDeleted {
                id,
                analysis_id,
                result,
            });
        });
    }
}
