//! Response classification: success, async-accepted, or typed error.

use crate::client::error_classification::{classify_status, parse_retry_after};
use crate::error::ApiError;
use crate::Result;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Header Coda uses to return the tracking id of a queued mutation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Successful outcome of one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// 204 No Content, or a 2xx with an empty body.
    Empty,
    /// 202 Accepted: the mutation is queued upstream and not yet applied.
    Accepted { request_id: Option<String> },
    /// Any other 2xx with a JSON body.
    Json(Value),
}

impl ApiPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiPayload::Empty)
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            ApiPayload::Accepted { request_id } => request_id.as_deref(),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ApiPayload::Empty => json!({}),
            ApiPayload::Accepted { request_id } => json!({ "requestId": request_id }),
            ApiPayload::Json(v) => v,
        }
    }

    /// Pretty-printed JSON rendering used in tool output.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.clone().into_value())?)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Pick the most useful message out of an error body: `message`, then
/// `error`, then `HTTP <code>: <reason>`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )
    };

    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    ["message", "error"]
        .iter()
        .find_map(|key| match parsed.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(fallback)
}

/// Classify a fully-read response.
pub fn classify(status: StatusCode, headers: &HeaderMap, body: &str) -> Result<ApiPayload> {
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(ApiPayload::Empty);
        }
        if status == StatusCode::ACCEPTED {
            return Ok(ApiPayload::Accepted {
                request_id: header_str(headers, REQUEST_ID_HEADER).map(String::from),
            });
        }
        if body.trim().is_empty() {
            return Ok(ApiPayload::Empty);
        }
        return Ok(ApiPayload::Json(serde_json::from_str(body)?));
    }

    let message = error_message(status, body);
    let retry_after = parse_retry_after(header_str(headers, "retry-after"));
    let raw = (!body.is_empty()).then(|| body.to_string());
    let err: ApiError = classify_status(status.as_u16(), message, retry_after, raw);
    Err(err.into())
}

/// Read the body and classify a live response.
pub async fn classify_response(response: reqwest::Response) -> Result<ApiPayload> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|e| crate::Error::Transport(crate::transport::TransportError::Http(e)))?;
    classify(status, &headers, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_204_is_empty() {
        let payload = classify(StatusCode::NO_CONTENT, &HeaderMap::new(), "").unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.into_value(), json!({}));
    }

    #[test]
    fn test_202_carries_only_request_id() {
        let payload = classify(
            StatusCode::ACCEPTED,
            &headers(&[("x-request-id", "abc123")]),
            r#"{"requestId":"ignored","addedRowIds":["i-1"]}"#,
        )
        .unwrap();
        assert_eq!(payload.request_id(), Some("abc123"));
        assert_eq!(payload.into_value(), json!({ "requestId": "abc123" }));
    }

    #[test]
    fn test_202_without_header() {
        let payload = classify(StatusCode::ACCEPTED, &HeaderMap::new(), "").unwrap();
        assert_eq!(payload, ApiPayload::Accepted { request_id: None });
    }

    #[test]
    fn test_200_parses_body() {
        let payload = classify(StatusCode::OK, &HeaderMap::new(), r#"{"id":"doc1"}"#).unwrap();
        assert_eq!(payload, ApiPayload::Json(json!({"id": "doc1"})));
    }

    #[test]
    fn test_200_with_invalid_json_is_serialization_error() {
        let err = classify(StatusCode::OK, &HeaderMap::new(), "<html>").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }

    #[test]
    fn test_error_message_precedence() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"Doc gone","error":"x"}"#),
            "Doc gone"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"statusCode":404}"#),
            "HTTP 404: Not Found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream exploded"),
            "HTTP 502: Bad Gateway"
        );
    }

    #[test]
    fn test_429_reads_retry_after() {
        let err = classify(
            StatusCode::TOO_MANY_REQUESTS,
            &headers(&[("retry-after", "30")]),
            r#"{"message":"Too many requests"}"#,
        )
        .unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.retry_after(), Some(30));
        assert_eq!(api.message(), "Too many requests");
    }

    #[test]
    fn test_401_message_from_body() {
        let err = classify(
            StatusCode::UNAUTHORIZED,
            &HeaderMap::new(),
            r#"{"statusCode":401,"statusMessage":"Unauthorized","message":"Bad token"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Bad token");
        assert_eq!(err.as_api().unwrap().name(), "authentication");
    }
}
