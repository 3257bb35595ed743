//! Analysis endpoints: list, fetch, upload, delete.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::http_client;
use crate::model::Analysis;

use super::{ApiError, DataEnvelope, get_json, map_call, parse_body};

/// `GET /analyses`
pub fn list(base_url: &str) -> Result<Vec<Analysis>, ApiError> {
    let envelope: DataEnvelope<Analysis> = get_json(&format!("{base_url}/analyses"))?;
    Ok(envelope.data)
}

/// `GET /analyses/{id}`
pub fn get(base_url: &str, id: i64) -> Result<Analysis, ApiError> {
    get_json(&format!("{base_url}/analyses/{id}"))
}

/// `POST /analyses` with the CSV attached as a multipart `file` field.
///
/// The returned analysis starts in `pending`; the server transitions it from
/// there.
pub fn create(base_url: &str, filename: &str, contents: &[u8]) -> Result<Analysis, ApiError> {
    let boundary = multipart_boundary();
    let body = multipart_file_body(&boundary, "file", filename, contents);
    let response = map_call(
        http_client::agent()
            .post(&format!("{base_url}/analyses"))
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .set("Accept", "application/json")
            .send_bytes(&body),
    )?;
    parse_body(response)
}

/// `DELETE /analyses/{id}`
pub fn delete(base_url: &str, id: i64) -> Result<(), ApiError> {
    map_call(
        http_client::agent()
            .delete(&format!("{base_url}/analyses/{id}"))
            .call(),
    )?;
    Ok(())
}

fn multipart_boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    format!("revlens-{nanos:x}")
}

fn multipart_file_body(boundary: &str, field: &str, filename: &str, contents: &[u8]) -> Vec<u8> {
    // Strip quotes/newlines so the filename cannot break the part header.
    let safe_name: String = filename
        .chars()
        .filter(|ch| *ch != '"' && *ch != '\r' && *ch != '\n')
        .collect();
    let mut body = Vec::with_capacity(contents.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{safe_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::tests::serve_json_once;
    use crate::model::Status;

    #[test]
    fn list_unwraps_data_envelope() {
        let url = serve_json_once(
            r#"{"data":[{"id":1,"status":"done","filename":"a.csv","created_at":"2026-08-01T00:00:00Z","error":null,"stats":{"total":1,"positive":1,"negative":0,"neutral":0}}]}"#,
        );
        let analyses = list(&url).unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].status, Status::Done);
    }

    #[test]
    fn list_tolerates_missing_data_field() {
        let url = serve_json_once("{}");
        assert!(list(&url).unwrap().is_empty());
    }

    #[test]
    fn get_returns_bare_entity() {
        let url = serve_json_once(
            r#"{"id":4,"status":"pending","filename":"b.csv","created_at":"2026-08-01T00:00:00Z","error":null,"stats":null}"#,
        );
        // The one-shot server ignores the path, so any id works here.
        let analysis = get(&url, 4).unwrap();
        assert_eq!(analysis.id, 4);
        assert_eq!(analysis.status, Status::Pending);
    }

    #[test]
    fn multipart_body_frames_the_file_field() {
        let body = multipart_file_body("bnd", "file", "reviews.csv", b"ID,text\n1,ok\n");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--bnd\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"reviews.csv\""));
        assert!(text.contains("ID,text\n1,ok\n"));
        assert!(text.ends_with("--bnd--\r\n"));
    }

    #[test]
    fn multipart_body_sanitizes_hostile_filenames() {
        let body = multipart_file_body("bnd", "file", "a\"b\r\n.csv", b"x");
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("filename=\"ab.csv\""));
    }
}
