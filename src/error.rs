use serde::Serialize;
use serde_json::{json, Value};

use crate::graph::RemoteError;
use crate::request::QueryRequest;

/// What the caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidParameter,
    AuthenticationError,
    RateLimited,
    RemoteUnavailable,
    UnknownError,
}

#[derive(thiserror::Error, Debug)]
pub enum DraftError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Mail service rejected the access token ({detail}) [{request}]")]
    Authentication { request: QueryRequest, detail: String },
    #[error("Mail service is throttling requests [{request}]")]
    RateLimited { request: QueryRequest, retry_after_ms: Option<u64> },
    #[error("Mail service unavailable ({detail}) [{request}]")]
    RemoteUnavailable { request: QueryRequest, detail: String },
    #[error("Unexpected mail service failure ({detail}) [{request}]")]
    Unknown { request: QueryRequest, detail: String },
}

impl DraftError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    /// Classifies a failed remote call. The request that triggered it rides
    /// along so the caller can tell which query failed.
    pub fn from_remote(err: RemoteError, request: &QueryRequest) -> Self {
        let request = request.clone();
        match err {
            RemoteError::Status { status, message, retry_after_ms } => {
                let detail = format!("HTTP {status}: {message}");
                match status.as_u16() {
                    401 | 403 => Self::Authentication { request, detail },
                    429 => Self::RateLimited { request, retry_after_ms },
                    408 | 500..=599 => Self::RemoteUnavailable { request, detail },
                    _ => Self::Unknown { request, detail },
                }
            }
            RemoteError::Transport(e) if e.is_decode() => {
                Self::Unknown { request, detail: e.to_string() }
            }
            RemoteError::Transport(e) => Self::RemoteUnavailable { request, detail: e.to_string() },
            RemoteError::DeadlineExceeded => {
                Self::RemoteUnavailable { request, detail: "deadline exceeded".to_string() }
            }
            e @ (RemoteError::InvalidJson(_) | RemoteError::MalformedPage(_)) => {
                Self::Unknown { request, detail: e.to_string() }
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::Authentication { .. } => ErrorKind::AuthenticationError,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::RemoteUnavailable { .. } => ErrorKind::RemoteUnavailable,
            Self::Unknown { .. } => ErrorKind::UnknownError,
        }
    }

    pub fn request(&self) -> Option<&QueryRequest> {
        match self {
            Self::InvalidParameter { .. } => None,
            Self::Authentication { request, .. }
            | Self::RateLimited { request, .. }
            | Self::RemoteUnavailable { request, .. }
            | Self::Unknown { request, .. } => Some(request),
        }
    }

    /// Structured payload attached to the MCP error.
    pub fn to_data(&self) -> Value {
        let mut data = json!({ "kind": self.kind() });
        if let Some(request) = self.request() {
            data["request"] = json!(request);
        }
        match self {
            Self::InvalidParameter { name, .. } => data["parameter"] = json!(name),
            Self::RateLimited { retry_after_ms: Some(ms), .. } => data["retry_after_ms"] = json!(ms),
            _ => {}
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RawDraftQuery;
    use reqwest::StatusCode;

    fn request() -> QueryRequest {
        QueryRequest::validate(RawDraftQuery {
            search: Some("invoice".into()),
            ..Default::default()
        })
        .unwrap()
    }

    fn status(code: u16) -> RemoteError {
        RemoteError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            message: "boom".into(),
            retry_after_ms: None,
        }
    }

    #[test]
    fn auth_statuses_map_to_authentication() {
        for code in [401, 403] {
            let err = DraftError::from_remote(status(code), &request());
            assert_eq!(err.kind(), ErrorKind::AuthenticationError);
        }
    }

    #[test]
    fn throttling_keeps_retry_hint() {
        let err = DraftError::from_remote(
            RemoteError::Status {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: String::new(),
                retry_after_ms: Some(4000),
            },
            &request(),
        );
        assert!(matches!(err, DraftError::RateLimited { retry_after_ms: Some(4000), .. }));
        assert_eq!(err.to_data()["retry_after_ms"], 4000);
    }

    #[test]
    fn server_errors_and_timeouts_are_unavailable() {
        for code in [408, 500, 502, 503, 504] {
            let err = DraftError::from_remote(status(code), &request());
            assert_eq!(err.kind(), ErrorKind::RemoteUnavailable, "status {code}");
        }
        let err = DraftError::from_remote(RemoteError::DeadlineExceeded, &request());
        assert_eq!(err.kind(), ErrorKind::RemoteUnavailable);
    }

    #[test]
    fn other_failures_are_unknown() {
        for code in [400, 404, 410] {
            let err = DraftError::from_remote(status(code), &request());
            assert_eq!(err.kind(), ErrorKind::UnknownError, "status {code}");
        }
        let err = DraftError::from_remote(RemoteError::MalformedPage("no value".into()), &request());
        assert_eq!(err.kind(), ErrorKind::UnknownError);
    }

    #[test]
    fn remote_errors_carry_request_parameters() {
        let err = DraftError::from_remote(status(503), &request());
        assert_eq!(err.request(), Some(&request()));
        let data = err.to_data();
        assert_eq!(data["kind"], "RemoteUnavailable");
        assert_eq!(data["request"]["search"], "invoice");
        assert_eq!(data["request"]["limit"], 10);
        assert!(err.to_string().contains("search=\"invoice\""));
    }

    #[test]
    fn invalid_parameter_names_the_parameter() {
        let err = DraftError::invalid("limit", "must be between 1 and 100, got 0");
        let data = err.to_data();
        assert_eq!(data["kind"], "InvalidParameter");
        assert_eq!(data["parameter"], "limit");
        assert!(data.get("request").is_none());
    }
}
