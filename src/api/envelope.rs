//! JSON / JSONP response envelope
//!
//! Successful payloads are written as-is, errors as a fixed
//! `{status, code, message, explanation}` object. When the request carries a
//! `callback` parameter the body becomes `callback(<json>)` and is served as
//! JavaScript instead.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript; charset=UTF-8";

const MAX_CALLBACK_LEN: usize = 128;

/// Human readable explanation for the status codes clients commonly hit.
pub fn default_explanation(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Request not properly formatted or contains unsupported parameters",
        404 => "Resource requested does not exist. URL may have been mistyped",
        408 => "Server did not receive a complete request within the time it was prepared to wait. Try again",
        500 => "Unexpected condition on server. Request could not be fulfilled.",
        _ => canonical_message(status),
    }
}

fn canonical_message(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    code: u16,
    message: &'static str,
    explanation: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            explanation: None,
        }
    }

    pub fn with_explanation(status: StatusCode, explanation: impl Into<String>) -> Self {
        Self {
            status,
            explanation: Some(explanation.into()),
        }
    }

    pub fn explanation(&self) -> &str {
        self.explanation
            .as_deref()
            .unwrap_or_else(|| default_explanation(self.status))
    }

    fn to_json(&self) -> String {
        let body = ErrorBody {
            status: "error",
            code: self.status.as_u16(),
            message: canonical_message(self.status),
            explanation: self.explanation(),
        };
        serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(
                r#"{{"status":"error","code":{},"message":"{}","explanation":""}}"#,
                body.code, body.message
            )
        })
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        Self::with_explanation(err.status_code(), err.to_string())
    }
}

/// Unwrapped JSON error, for requests whose callback could not be trusted.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Callback(None).error(self)
    }
}

/// Optional JSONP callback name taken from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callback(pub Option<String>);

#[derive(Debug, Deserialize)]
struct CallbackParams {
    callback: Option<String>,
}

impl Callback {
    /// Accepts dotted JavaScript identifier paths such as `jQuery123.cb`.
    pub fn is_valid_name(name: &str) -> bool {
        name.len() <= MAX_CALLBACK_LEN
            && !name.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
    }

    pub fn success<T: Serialize>(&self, payload: &T) -> Response {
        match serde_json::to_string(payload) {
            Ok(json) => self.render(StatusCode::OK, json),
            Err(err) => {
                tracing::error!("Failed to serialize response payload: {}", err);
                self.error(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR))
            }
        }
    }

    pub fn error(&self, error: ApiError) -> Response {
        self.render(error.status, error.to_json())
    }

    fn render(&self, status: StatusCode, json: String) -> Response {
        match &self.0 {
            Some(name) => (
                status,
                [(header::CONTENT_TYPE, JAVASCRIPT_CONTENT_TYPE)],
                format!("{name}({json})"),
            )
                .into_response(),
            None => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Callback {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // a broken query string is reported by the handler's own extractor
        let Ok(Query(params)) = Query::<CallbackParams>::try_from_uri(&parts.uri) else {
            return Ok(Self(None));
        };

        match params.callback.filter(|name| !name.is_empty()) {
            None => Ok(Self(None)),
            Some(name) if Self::is_valid_name(&name) => Ok(Self(Some(name))),
            Some(_) => Err(ApiError::with_explanation(
                StatusCode::BAD_REQUEST,
                "callback must be a JavaScript identifier",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde_json::{json, Value};

    async fn body_of(response: Response) -> (StatusCode, String, String) {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn extract(uri: &str) -> Result<Callback, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Callback::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn test_explanation_table() {
        assert!(default_explanation(StatusCode::NOT_FOUND).starts_with("Resource requested does not exist"));
        assert!(default_explanation(StatusCode::REQUEST_TIMEOUT).contains("complete request"));
        assert_eq!(default_explanation(StatusCode::METHOD_NOT_ALLOWED), "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_success_plain_json() {
        let (status, content_type, body) = body_of(Callback(None).success(&json!({"a": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, JSON_CONTENT_TYPE);
        assert_eq!(body, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_success_jsonp() {
        let callback = Callback(Some("foo".to_string()));
        let (_, content_type, body) = body_of(callback.success(&json!([1, 2]))).await;
        assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
        assert_eq!(body, "foo([1,2])");
    }

    #[tokio::test]
    async fn test_error_shape() {
        let (status, _, body) = body_of(Callback(None).error(ApiError::new(StatusCode::NOT_FOUND))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "error",
                "code": 404,
                "message": "Not Found",
                "explanation": "Resource requested does not exist. URL may have been mistyped"
            })
        );
    }

    #[tokio::test]
    async fn test_error_jsonp_with_override() {
        let callback = Callback(Some("cb".to_string()));
        let err = ApiError::with_explanation(StatusCode::INTERNAL_SERVER_ERROR, "disk on fire");
        let (status, content_type, body) = body_of(callback.error(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type, JAVASCRIPT_CONTENT_TYPE);
        assert!(body.starts_with("cb({"));
        assert!(body.ends_with("})"));
        let value: Value = serde_json::from_str(&body[3..body.len() - 1]).unwrap();
        assert_eq!(value["explanation"], "disk on fire");
        assert_eq!(value["message"], "Internal Server Error");
    }

    #[test]
    fn test_stats_error_conversion() {
        let err: ApiError = StatsError::invalid_date("nope").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.explanation(), "date provided (nope) is not properly formatted");
    }

    #[tokio::test]
    async fn test_callback_extraction() {
        assert_eq!(extract("/").await.unwrap(), Callback(None));
        assert_eq!(extract("/?callback=").await.unwrap(), Callback(None));
        assert_eq!(
            extract("/?date=2024-01-01&callback=jQuery_1.done").await.unwrap(),
            Callback(Some("jQuery_1.done".to_string()))
        );

        let err = extract("/?callback=alert(1)//").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_callback_names() {
        assert!(Callback::is_valid_name("foo"));
        assert!(Callback::is_valid_name("$jsonp.cb_2"));
        assert!(!Callback::is_valid_name("1foo"));
        assert!(!Callback::is_valid_name(".foo"));
        assert!(!Callback::is_valid_name("foo bar"));
        assert!(!Callback::is_valid_name(&"a".repeat(MAX_CALLBACK_LEN + 1)));
    }
}
