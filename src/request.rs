use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::DraftError;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Caller input exactly as the orchestrator sent it. `limit` and
/// `include_attachments_info` stay untyped until [`QueryRequest::validate`]
/// has looked at them.
#[derive(Debug, Clone, Default)]
pub struct RawDraftQuery {
    pub limit: Option<Value>,
    pub search: Option<String>,
    pub include_attachments_info: Option<Value>,
}

/// A validated draft listing request. Only [`QueryRequest::validate`]
/// builds one, so every downstream stage can trust its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    limit: u32,
    search: Option<String>,
    include_attachments_info: bool,
}

impl QueryRequest {
    pub fn validate(raw: RawDraftQuery) -> Result<Self, DraftError> {
        let limit = parse_limit(raw.limit)?;
        let search = raw
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let include_attachments_info = match raw.include_attachments_info {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                return Err(DraftError::invalid(
                    "include_attachments_info",
                    format!("must be a boolean, got {other}"),
                ))
            }
        };
        Ok(Self { limit, search, include_attachments_info })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn include_attachments_info(&self) -> bool {
        self.include_attachments_info
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit={}", self.limit)?;
        if let Some(search) = &self.search {
            write!(f, ", search={search:?}")?;
        }
        write!(f, ", include_attachments_info={}", self.include_attachments_info)
    }
}

fn parse_limit(raw: Option<Value>) -> Result<u32, DraftError> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(DEFAULT_LIMIT),
        Some(v) => v,
    };
    let n = match &value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    };
    match n {
        Some(n) if (1..=i64::from(MAX_LIMIT)).contains(&n) => Ok(n as u32),
        Some(n) => Err(DraftError::invalid(
            "limit",
            format!("must be between 1 and {MAX_LIMIT}, got {n}"),
        )),
        None => Err(DraftError::invalid(
            "limit",
            format!("must be an integer, got {value}"),
        )),
    }
}
