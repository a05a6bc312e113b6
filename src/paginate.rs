use serde_json::Value;
use tracing::debug;

use crate::auth::Credential;
use crate::graph::{GraphClient, RemoteError};
use crate::query::DraftQuery;

/// Walks the drafts listing page by page until `limit` items are in hand
/// or Graph stops handing out continuation links.
///
/// Each page goes through `keep` before it counts toward `limit`, so records
/// that `keep` throws away are made up from the following page. Requests are
/// strictly sequential, since each one needs the cursor from the previous
/// response. Any failed request aborts the walk and everything gathered so
/// far is discarded. The result is cut to exactly `limit`.
pub async fn collect_drafts<T>(
    client: &GraphClient,
    credential: &Credential,
    query: &DraftQuery,
    limit: usize,
    mut keep: impl FnMut(Vec<Value>) -> Vec<T>,
) -> Result<Vec<T>, RemoteError> {
    let mut items = Vec::with_capacity(limit);
    let mut page = client.first_page(credential, query).await?;
    let mut requests = 1;

    loop {
        items.extend(keep(page.records));
        if items.len() >= limit {
            break;
        }
        match page.next {
            Some(cursor) => {
                page = client.next_page(credential, &cursor).await?;
                requests += 1;
            }
            None => break,
        }
    }

    items.truncate(limit);
    debug!(requests, collected = items.len(), limit, "drafts pagination finished");
    Ok(items)
}
