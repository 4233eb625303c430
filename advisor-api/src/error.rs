//! API error responses
//!
//! Validation failures are reported with a field location so callers can
//! point at the offending input:
//!
//! ```text
//! {"detail": [{"loc": ["body", "amount"], "msg": "...", "type": "missing"}]}
//! ```

use advisor_pricing::PricingError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// One field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn body(path: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(path.iter().filter(|s| !s.is_empty()).map(|s| s.to_string()));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Interpret a serde data error message such as
    /// ``amount: invalid type: string "x", expected i64 at line 1 column 15``
    /// or ``missing field `amount` at line 1 column 2``.
    pub fn from_serde_message(message: &str) -> Self {
        let message = strip_position(message);
        let (path, detail) = split_path(message);
        let mut segments: Vec<&str> = path.map(|p| p.split('.').collect()).unwrap_or_default();

        if let Some(field) = missing_field(detail) {
            segments.push(field);
            return Self::body(&segments, format!("field `{}` is required", field), "missing");
        }

        let kind = if detail.starts_with("invalid type") {
            "invalid_type"
        } else if detail.starts_with("invalid value") || detail.starts_with("invalid length") {
            "invalid_value"
        } else if detail.starts_with("unknown field") {
            "unknown_field"
        } else {
            "value_error"
        };

        Self::body(&segments, detail, kind)
    }
}

/// Errors surfaced to HTTP callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let detail = text
                    .split_once("target type: ")
                    .map(|(_, rest)| rest)
                    .unwrap_or(text.as_str());
                ApiError::Validation(vec![FieldError::from_serde_message(detail)])
            }
            JsonRejection::JsonSyntaxError(err) => {
                let text = err.body_text();
                let detail = text
                    .split_once("as JSON: ")
                    .map(|(_, rest)| rest)
                    .unwrap_or(text.as_str());
                ApiError::Validation(vec![FieldError::body(
                    &[],
                    strip_position(detail),
                    "json_invalid",
                )])
            }
            JsonRejection::MissingJsonContentType(err) => {
                ApiError::UnsupportedMediaType(err.body_text())
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Pricing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(fields) => {
                warn!(?fields, "rejected suggestion request");
                serde_json::json!({ "detail": fields })
            }
            ApiError::UnsupportedMediaType(msg) | ApiError::BadRequest(msg) => {
                warn!(%status, %msg, "rejected suggestion request");
                serde_json::json!({ "detail": msg })
            }
            ApiError::Pricing(err) => {
                error!(%err, "pricing failed");
                serde_json::json!({ "detail": err.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Drop serde's trailing `at line N column M`
fn strip_position(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(idx) => &message[..idx],
        None => message,
    }
}

/// Field name from a detail that begins with ``missing field `name` ``
fn missing_field(detail: &str) -> Option<&str> {
    let rest = detail.strip_prefix("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}

/// Split a `path: detail` message. The path must look like a field path.
fn split_path(message: &str) -> (Option<&str>, &str) {
    if let Some((path, detail)) = message.split_once(": ") {
        let looks_like_path = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']' | '?'));
        if looks_like_path && !detail.is_empty() {
            return (Some(path), detail);
        }
    }
    (None, message)
}
