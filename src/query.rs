use crate::request::QueryRequest;

/// Graph's well-known name for the Drafts folder.
pub const DRAFTS_FOLDER: &str = "drafts";
/// Largest `$top` Graph honours for message listings.
pub const MAX_PAGE_SIZE: u32 = 100;

const MESSAGE_FIELDS: &[&str] = &[
    "id",
    "subject",
    "toRecipients",
    "ccRecipients",
    "bccRecipients",
    "bodyPreview",
    "hasAttachments",
    "lastModifiedDateTime",
];

const ATTACHMENT_EXPANSION: &str = "attachments($select=name,size,contentType)";

/// The first-page request for a drafts listing. Later pages come from the
/// continuation links Graph hands back, not from this descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftQuery {
    pub folder: &'static str,
    pub page_size: u32,
    pub select: String,
    pub search: Option<String>,
    pub expand: Option<&'static str>,
}

impl DraftQuery {
    pub fn build(request: &QueryRequest) -> Self {
        Self {
            folder: DRAFTS_FOLDER,
            page_size: request.limit().min(MAX_PAGE_SIZE),
            select: MESSAGE_FIELDS.join(","),
            search: request.search().and_then(search_expression),
            expand: request.include_attachments_info().then_some(ATTACHMENT_EXPANSION),
        }
    }

    pub fn path(&self) -> String {
        format!("/me/mailFolders/{}/messages", self.folder)
    }

    /// OData system query options, unencoded; the HTTP client encodes them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("$top", self.page_size.to_string()),
            ("$select", self.select.clone()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("$search", search.clone()));
        }
        if let Some(expand) = self.expand {
            pairs.push(("$expand", expand.to_string()));
        }
        pairs
    }
}

/// KQL matching `term` against subject, body or any recipient.
///
/// The whole expression sits inside one pair of double quotes, so quotes and
/// backslashes in the term cannot be carried and are dropped. The term is
/// always wrapped in escaped quotes, so KQL operators inside it (`:`, `(`,
/// `OR`, `+`) match as text. Returns `None` when nothing searchable is left.
pub fn search_expression(term: &str) -> Option<String> {
    let cleaned: String = term.chars().filter(|c| !matches!(c, '"' | '\\')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let value = format!("\\\"{cleaned}\\\"");
    Some(format!("\"subject:{value} OR body:{value} OR recipients:{value}\""))
}
