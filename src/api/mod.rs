//! Data Service client for the analysis backend.
//!
//! List endpoints wrap payloads in `{ "data": [...] }`; single-entity
//! endpoints return the bare entity. Any non-2xx response maps to a single
//! error taxonomy; callers do not branch on status codes.

pub mod analyses;
pub mod clusters;
pub mod reviews;

use serde::de::DeserializeOwned;

use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Errors produced by any backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("Server responded with HTTP {code}")]
    Status { code: u16 },
    /// The request never completed (DNS, connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The response arrived but could not be decoded.
    #[error("Invalid response body: {0}")]
    Body(String),
}

/// List-endpoint envelope. A missing `data` field decodes as an empty list.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub(crate) data: Vec<T>,
}

pub(crate) fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = map_call(
        http_client::agent()
            .get(url)
            .set("Accept", "application/json")
            .call(),
    )?;
    parse_body(response)
}

pub(crate) fn map_call(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, ApiError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(code, _)) => Err(ApiError::Status { code }),
        Err(ureq::Error::Transport(err)) => Err(ApiError::Transport(err.to_string())),
    }
}

pub(crate) fn parse_body<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| ApiError::Body(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Body(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::tests::serve_json_once;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn envelope_defaults_to_empty_data() {
        let parsed: DataEnvelope<Item> = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn get_json_decodes_payload() {
        let url = serve_json_once(r#"{"data":[{"id":1},{"id":2}]}"#);
        let parsed: DataEnvelope<Item> = get_json(&url).unwrap();
        assert_eq!(parsed.data, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn non_success_status_maps_to_status_error() {
        let url = crate::http_client::tests::serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n".to_string(),
        );
        let err = get_json::<DataEnvelope<Item>>(&url).unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 500 }));
    }

    #[test]
    fn garbage_body_maps_to_body_error() {
        let url = serve_json_once("not json");
        let err = get_json::<DataEnvelope<Item>>(&url).unwrap_err();
        assert!(matches!(err, ApiError::Body(_)));
    }
}
