use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Caller-facing view of one draft. Built fresh from each Graph record and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMessage {
    pub id: String,
    pub subject: String,
    pub recipients: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub body_preview: String,
    pub has_attachments: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// `None` when attachment info was not requested. Serialized as an
    /// absent key, which callers can tell apart from `[]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentInfo>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

impl DraftMessage {
    /// Fails with the name of the first required field that is missing or
    /// has the wrong type.
    pub fn from_record(record: &Value, include_attachments: bool) -> Result<Self, &'static str> {
        let id = required_str(record, "id")?;
        let subject = required_str(record, "subject")?;
        let recipients = record
            .get("toRecipients")
            .and_then(Value::as_array)
            .map(|list| addresses(list))
            .ok_or("toRecipients")?;
        let body_preview = required_str(record, "bodyPreview")?;
        let has_attachments = record
            .get("hasAttachments")
            .and_then(Value::as_bool)
            .ok_or("hasAttachments")?;

        let attachments = include_attachments.then(|| {
            record
                .get("attachments")
                .and_then(Value::as_array)
                .map(|list| attachment_list(&id, list))
                .unwrap_or_default()
        });

        Ok(Self {
            cc: optional_addresses(record, "ccRecipients"),
            bcc: optional_addresses(record, "bccRecipients"),
            last_modified: record
                .get("lastModifiedDateTime")
                .and_then(Value::as_str)
                .map(str::to_string),
            id,
            subject,
            recipients,
            body_preview,
            has_attachments,
            attachments,
        })
    }
}

/// Maps raw records in order. Records missing a required field are dropped
/// with a warning; the rest of the batch still goes through.
pub fn normalize(records: Vec<Value>, include_attachments: bool) -> Vec<DraftMessage> {
    records
        .iter()
        .filter_map(|record| match DraftMessage::from_record(record, include_attachments) {
            Ok(draft) => Some(draft),
            Err(field) => {
                let id = record.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
                warn!(id, field, "dropping draft record missing a required field");
                None
            }
        })
        .collect()
}

fn required_str(record: &Value, field: &'static str) -> Result<String, &'static str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(field)
}

fn optional_addresses(record: &Value, field: &str) -> Vec<String> {
    record
        .get(field)
        .and_then(Value::as_array)
        .map(|list| addresses(list))
        .unwrap_or_default()
}

// Graph recipient: {"emailAddress": {"name": "...", "address": "..."}}
fn addresses(list: &[Value]) -> Vec<String> {
    list.iter()
        .filter_map(|r| r.pointer("/emailAddress/address").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn attachment_list(draft_id: &str, list: &[Value]) -> Vec<AttachmentInfo> {
    list.iter()
        .filter_map(|a| {
            let parsed = parse_attachment(a);
            if parsed.is_none() {
                warn!(id = draft_id, "skipping malformed attachment entry");
            }
            parsed
        })
        .collect()
}

fn parse_attachment(a: &Value) -> Option<AttachmentInfo> {
    Some(AttachmentInfo {
        name: a.get("name")?.as_str()?.to_string(),
        size: a.get("size")?.as_u64()?,
        content_type: a.get("contentType")?.as_str()?.to_string(),
    })
}
