use serde_json::Value;

use crate::model::SamplerError;

pub const DURATION_TEXT_PATH: &str = "rows[0].elements[0].duration_in_traffic.text";

/// pulls the traffic-aware duration text out of a distance matrix response body.
///
/// # Arguments
/// * body - raw response text
///
/// # Result
/// the text at `rows[0].elements[0].duration_in_traffic.text`, or an error
/// naming the missing path. when the service reported a status (top-level or
/// for the element), it is carried on the error.
pub fn extract_duration_text(body: &str) -> Result<String, SamplerError> {
    let json: Value = serde_json::from_str(body)?;
    let element = json
        .get("rows")
        .and_then(|rows| rows.get(0))
        .and_then(|row| row.get("elements"))
        .and_then(|elements| elements.get(0));
    let text = element
        .and_then(|e| e.get("duration_in_traffic"))
        .and_then(|d| d.get("text"))
        .and_then(Value::as_str);
    match text {
        Some(t) => Ok(t.to_string()),
        None => {
            let status = element
                .and_then(|e| e.get("status"))
                .or_else(|| json.get("status"))
                .and_then(Value::as_str)
                .map(|s| match json.get("error_message").and_then(Value::as_str) {
                    Some(msg) => format!("{s}: {msg}"),
                    None => s.to_string(),
                });
            Err(SamplerError::MissingField {
                path: DURATION_TEXT_PATH.to_string(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_duration_text() {
        let body = r#"{"rows":[{"elements":[{"duration_in_traffic":{"text":"22 mins","value":1320}}]}]}"#;
        assert_eq!(extract_duration_text(body).unwrap(), "22 mins");
    }

    #[test]
    fn test_empty_rows_is_missing_field() {
        let result = extract_duration_text(r#"{"rows":[]}"#);
        match result {
            Err(SamplerError::MissingField { path, status }) => {
                assert_eq!(path, DURATION_TEXT_PATH);
                assert_eq!(status, None);
            }
            other => panic!("expected MissingField, found {other:?}"),
        }
    }

    #[test]
    fn test_element_status_is_reported() {
        let body = r#"{"status":"OK","rows":[{"elements":[{"status":"ZERO_RESULTS"}]}]}"#;
        match extract_duration_text(body) {
            Err(SamplerError::MissingField { status, .. }) => {
                assert_eq!(status.as_deref(), Some("ZERO_RESULTS"))
            }
            other => panic!("expected MissingField, found {other:?}"),
        }
    }

    #[test]
    fn test_request_denied_status_is_reported() {
        let body = r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid.","rows":[]}"#;
        let msg = extract_duration_text(body).unwrap_err().to_string();
        assert!(msg.contains("REQUEST_DENIED: The provided API key is invalid."), "{msg}");
    }

    #[test]
    fn test_non_string_text_is_missing_field() {
        let body = r#"{"rows":[{"elements":[{"duration_in_traffic":{"text":12}}]}]}"#;
        assert!(matches!(
            extract_duration_text(body),
            Err(SamplerError::MissingField { .. })
        ));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            extract_duration_text("<html>502 Bad Gateway</html>"),
            Err(SamplerError::MalformedResponse(_))
        ));
    }
}
