//! Review endpoints: list, fetch, sentiment correction, delete.

use crate::http_client;
use crate::model::{Review, ReviewUpdate};

use super::{ApiError, DataEnvelope, get_json, map_call, parse_body};

/// `GET /analyses/{analysis_id}/reviews`
pub fn list(base_url: &str, analysis_id: i64) -> Result<Vec<Review>, ApiError> {
    let envelope: DataEnvelope<Review> =
        get_json(&format!("{base_url}/analyses/{analysis_id}/reviews"))?;
    Ok(envelope.data)
}

/// `GET /reviews/{id}`
pub fn get(base_url: &str, id: i64) -> Result<Review, ApiError> {
    get_json(&format!("{base_url}/reviews/{id}"))
}

/// `PATCH /reviews/{id}`: partial update; currently only `sentiment`.
pub fn update(base_url: &str, id: i64, update: &ReviewUpdate) -> Result<Review, ApiError> {
    let response = map_call(
        http_client::agent()
            .request("PATCH", &format!("{base_url}/reviews/{id}"))
            .set("Accept", "application/json")
            .send_json(update),
    )?;
    parse_body(response)
}

/// `DELETE /reviews/{id}`
pub fn delete(base_url: &str, id: i64) -> Result<(), ApiError> {
    map_call(
        http_client::agent()
            .delete(&format!("{base_url}/reviews/{id}"))
            .call(),
    )?;
    Ok(())
}
