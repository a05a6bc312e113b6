use reqwest::header::{HeaderMap, ACCEPT, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::auth::Credential;
use crate::query::DraftQuery;
use crate::sanitize::strip_control_chars;

#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    #[error("Graph not reachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Graph returned HTTP {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        retry_after_ms: Option<u64>,
    },
    #[error("Invalid JSON from Graph: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Malformed page from Graph: {0}")]
    MalformedPage(String),
    #[error("Deadline exceeded before the listing finished")]
    DeadlineExceeded,
}

/// Continuation link handed out by Graph (`@odata.nextLink`). Followed
/// verbatim, never built or picked apart here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of raw message records, in the order Graph returned them.
#[derive(Debug)]
pub struct DraftPage {
    pub records: Vec<Value>,
    pub next: Option<PageCursor>,
}

impl DraftPage {
    fn from_value(mut value: Value) -> Result<Self, RemoteError> {
        let records = match value.get_mut("value").map(Value::take) {
            Some(Value::Array(records)) => records,
            _ => return Err(RemoteError::MalformedPage("missing `value` array".into())),
        };
        let next = value
            .get("@odata.nextLink")
            .and_then(Value::as_str)
            .map(|link| PageCursor(link.to_string()));
        Ok(Self { records, next })
    }
}

#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
}

impl GraphClient {
    pub fn with_base_url(base_url: String) -> Self {
        Self { client: Client::new(), base_url }
    }

    pub async fn first_page(
        &self,
        credential: &Credential,
        query: &DraftQuery,
    ) -> Result<DraftPage, RemoteError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), query.path());
        debug!(%url, top = query.page_size, "requesting first drafts page");
        let req = self.client.get(&url).query(&query.query_pairs());
        self.fetch(req, credential).await
    }

    pub async fn next_page(
        &self,
        credential: &Credential,
        cursor: &PageCursor,
    ) -> Result<DraftPage, RemoteError> {
        debug!(url = cursor.as_str(), "following drafts continuation link");
        self.fetch(self.client.get(cursor.as_str()), credential).await
    }

    async fn fetch(&self, req: RequestBuilder, credential: &Credential) -> Result<DraftPage, RemoteError> {
        let resp = req
            .bearer_auth(credential.secret())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after_ms = parse_retry_after(resp.headers());
            let body = resp.text().await.unwrap_or_default();
            let message = graph_error_message(&body).unwrap_or(body);
            return Err(RemoteError::Status { status, message, retry_after_ms });
        }

        let text = resp.text().await?;
        let value: Value = serde_json::from_str(&strip_control_chars(&text))?;
        DraftPage::from_value(value)
    }
}

/// `Retry-After` in whole or fractional seconds. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let secs = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse::<f64>().ok()?;
    Some((secs * 1000.0).max(0.0) as u64)
}

/// Pulls `error.code` / `error.message` out of a Graph error body.
fn graph_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let message = error.get("message").and_then(Value::as_str)?;
    match error.get("code").and_then(Value::as_str) {
        Some(code) => Some(format!("{code}: {message}")),
        None => Some(message.to_string()),
    }
}
