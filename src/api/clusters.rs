//! Cluster endpoints (read-only).

use crate::model::Cluster;

use super::{ApiError, DataEnvelope, get_json};

/// `GET /analyses/{analysis_id}/clusters`
pub fn list(base_url: &str, analysis_id: i64) -> Result<Vec<Cluster>, ApiError> {
    let envelope: DataEnvelope<Cluster> =
        get_json(&format!("{base_url}/analyses/{analysis_id}/clusters"))?;
    Ok(envelope.data)
}

/// `GET /clusters/{id}`
pub fn get(base_url: &str, id: i64) -> Result<Cluster, ApiError> {
    get_json(&format!("{base_url}/clusters/{id}"))
}
