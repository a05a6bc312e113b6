use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ServerHandler,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, Error as McpError,
};
use serde_json::Value;

use crate::auth::Credential;
use crate::executor::DraftsExecutor;
use crate::tools::drafts;

#[derive(Clone)]
pub struct DraftsMcp {
    pub executor: Arc<DraftsExecutor>,
    pub credential: Credential,
    pub call_timeout: Duration,
}

#[tool(tool_box)]
impl DraftsMcp {
    #[tool(description = "List draft emails from the mailbox's Drafts folder, optionally filtered by a search term matched against subject, body and recipients")]
    async fn list_draft_emails(
        &self,
        #[tool(param)]
        #[schemars(description = "Maximum number of drafts to return, integer 1-100, default 10")]
        limit: Option<Value>,
        #[tool(param)]
        #[schemars(description = "Text to match in subject, body or recipient addresses")]
        search: Option<String>,
        #[tool(param)]
        #[schemars(description = "Include name, size and content type of each attachment (default true)")]
        include_attachments_info: Option<Value>,
    ) -> Result<CallToolResult, McpError> {
        drafts::list_draft_emails(
            &self.executor,
            &self.credential,
            self.call_timeout,
            limit,
            search,
            include_attachments_info,
        )
        .await
    }
}

#[tool(tool_box)]
impl ServerHandler for DraftsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Read-only access to mailbox drafts. Use list_draft_emails; it never sends or edits mail."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
