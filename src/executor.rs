use tokio::time::Instant;
use tracing::{debug, info};

use crate::auth::Credential;
use crate::error::DraftError;
use crate::graph::{GraphClient, RemoteError};
use crate::normalize::{self, DraftMessage};
use crate::paginate;
use crate::query::DraftQuery;
use crate::request::{QueryRequest, RawDraftQuery};

pub struct DraftsExecutor {
    client: GraphClient,
}

impl DraftsExecutor {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Validates `raw`, pages through the Drafts folder and returns at most
    /// `limit` normalized drafts in Graph's order. Records dropped as
    /// incomplete do not count toward `limit`.
    ///
    /// Invalid input fails before any request goes out. When `deadline`
    /// passes mid-listing the whole call fails with `RemoteUnavailable`;
    /// nothing fetched so far is returned.
    pub async fn list_draft_emails(
        &self,
        credential: &Credential,
        raw: RawDraftQuery,
        deadline: Option<Instant>,
    ) -> Result<Vec<DraftMessage>, DraftError> {
        let request = QueryRequest::validate(raw)?;
        let query = DraftQuery::build(&request);
        debug!(%request, "listing drafts");

        let limit = request.limit() as usize;
        let include = request.include_attachments_info();
        let walk = paginate::collect_drafts(&self.client, credential, &query, limit, |page| {
            normalize::normalize(page, include)
        });
        let fetched = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, walk)
                .await
                .unwrap_or(Err(RemoteError::DeadlineExceeded)),
            None => walk.await,
        };
        let drafts = fetched.map_err(|e| DraftError::from_remote(e, &request))?;

        info!(%request, returned = drafts.len(), "drafts listed");
        Ok(drafts)
    }
}
