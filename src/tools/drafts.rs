use std::time::Duration;

use rmcp::{model::{CallToolResult, Content}, Error as McpError};
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::auth::Credential;
use crate::error::{DraftError, ErrorKind};
use crate::executor::DraftsExecutor;
use crate::normalize::DraftMessage;
use crate::request::RawDraftQuery;

pub fn draft_err(e: DraftError) -> McpError {
    let data = Some(e.to_data());
    match e.kind() {
        ErrorKind::InvalidParameter => McpError::invalid_params(e.to_string(), data),
        _ => McpError::internal_error(e.to_string(), data),
    }
}

pub fn result_text(v: Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&v).unwrap_or_default()
    )])
}

fn drafts_payload(drafts: &[DraftMessage]) -> Value {
    json!({ "count": drafts.len(), "drafts": drafts })
}

pub async fn list_draft_emails(
    executor: &DraftsExecutor,
    credential: &Credential,
    call_timeout: Duration,
    limit: Option<Value>,
    search: Option<String>,
    include_attachments_info: Option<Value>,
) -> Result<CallToolResult, McpError> {
    let raw = RawDraftQuery { limit, search, include_attachments_info };
    let deadline = Instant::now() + call_timeout;
    let drafts = executor
        .list_draft_emails(credential, raw, Some(deadline))
        .await
        .map_err(draft_err)?;
    Ok(result_text(drafts_payload(&drafts)))
}
