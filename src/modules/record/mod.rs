// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::envelope::{first_email_address, parse_email_addresses};
use crate::modules::gmail::model::MessageMeta;
use crate::modules::member::resolve_member_id;
use crate::modules::store::InboxStore;

/// Sender value persisted when the From header carries nothing usable.
pub const UNKNOWN_SENDER: &str = "unknown@unknown";
/// Recipient value persisted when the To header carries nothing usable.
pub const UNDISCLOSED_RECIPIENTS: &str = "undisclosed-recipients:;";
/// Subject persisted when the header is absent.
pub const MISSING_SUBJECT: &str = "(no subject)";

const UNREAD_LABEL: &str = "UNREAD";

/// One synchronized message as the store persists it. Keyed on
/// `gmail_message_id`, so re-running the pipeline overwrites rather than
/// duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxRecord {
    pub gmail_message_id: String,
    pub gmail_thread_id: String,
    pub history_id: Option<String>,
    pub snippet: Option<String>,
    pub subject: String,
    pub from_address: String,
    pub to_address: String,
    pub cc_address: Option<String>,
    pub message_id: String,
    pub references_header: Option<String>,
    pub in_reply_to: Option<String>,
    pub date: DateTime<Utc>,
    pub label_ids: Vec<String>,
    pub is_read: bool,
    pub member_id: Option<String>,
    pub synced_at: DateTime<Utc>,
}

/// Assembles the persisted record for one fetched message.
///
/// Never fails: unparseable dates fall through the timestamp chain, and an
/// unresolvable sender leaves `member_id` to the forced override or empty.
/// The member lookup is the only side effect.
pub async fn build_inbox_record<S: InboxStore>(
    store: &S,
    message: &MessageMeta,
    forced_member_id: Option<&str>,
) -> InboxRecord {
    let from_address = message.header("From").and_then(first_email_address);
    let member_id = resolve_member_id(store, from_address.as_deref())
        .await
        .or_else(|| forced_member_id.map(str::to_owned));

    InboxRecord {
        gmail_message_id: message.id.clone(),
        gmail_thread_id: message
            .thread_id
            .clone()
            .unwrap_or_else(|| message.id.clone()),
        history_id: message.history_id.clone(),
        snippet: message.snippet.clone(),
        subject: message
            .header("Subject")
            .map(str::to_owned)
            .unwrap_or_else(|| MISSING_SUBJECT.to_owned()),
        from_address: from_address.unwrap_or_else(|| UNKNOWN_SENDER.to_owned()),
        to_address: join_address_list(message.header("To"))
            .unwrap_or_else(|| UNDISCLOSED_RECIPIENTS.to_owned()),
        cc_address: join_address_list(message.header("Cc")),
        message_id: message
            .header("Message-ID")
            .map(str::to_owned)
            .unwrap_or_else(|| message.id.clone()),
        references_header: message.header("References").map(str::to_owned),
        in_reply_to: message.header("In-Reply-To").map(str::to_owned),
        date: resolve_message_date(message),
        label_ids: message.label_ids.clone(),
        is_read: !message.label_ids.iter().any(|label| label == UNREAD_LABEL),
        member_id,
        synced_at: Utc::now(),
    }
}

/// Comma-joined normalized addresses, else the raw trimmed header, else
/// nothing.
fn join_address_list(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let parsed = parse_email_addresses(raw);
    if !parsed.is_empty() {
        return Some(parsed.join(", "));
    }
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Date header, else the provider's internal timestamp, else the current
/// instant. Candidates that fail to parse are skipped.
fn resolve_message_date(message: &MessageMeta) -> DateTime<Utc> {
    if let Some(raw) = message.header("Date") {
        if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
            return parsed.with_timezone(&Utc);
        }
    }

    if let Some(millis) = message
        .internal_date
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
    {
        if let Some(parsed) = Utc.timestamp_millis_opt(millis).single() {
            return parsed;
        }
    }

    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::{
        build_inbox_record, MISSING_SUBJECT, UNDISCLOSED_RECIPIENTS, UNKNOWN_SENDER,
    };
    use crate::modules::gmail::model::{Header, MessageMeta, Payload};
    use crate::modules::store::testing::MockStore;
    use chrono::{TimeZone, Utc};

    fn message(headers: &[(&str, &str)]) -> MessageMeta {
        MessageMeta {
            id: "msg-123".into(),
            thread_id: Some("thread-456".into()),
            history_id: Some("789".into()),
            internal_date: Some("1694692800000".into()),
            label_ids: vec!["INBOX".into()],
            snippet: Some("Snippet text".into()),
            payload: Payload {
                mime_type: None,
                headers: headers
                    .iter()
                    .map(|(name, value)| Header {
                        name: (*name).into(),
                        value: (*value).into(),
                    })
                    .collect(),
            },
        }
    }

    fn full_message() -> MessageMeta {
        message(&[
            ("Subject", "Test Subject"),
            ("From", "Alice <alice@example.com>"),
            ("To", "Bob <bob@example.com>"),
            ("Cc", "cc@example.com"),
            ("Bcc", "bcc@example.com"),
            ("Date", "Thu, 14 Sep 2023 12:00:00 +0000"),
            ("Message-ID", "<message@example.com>"),
            ("References", "<ref@example.com>"),
            ("In-Reply-To", "<reply@example.com>"),
        ])
    }

    #[tokio::test]
    async fn builds_full_record_with_resolved_member() {
        let store = MockStore::with_member("alice@example.com", "member-123");
        let record = build_inbox_record(&store, &full_message(), None).await;

        assert_eq!(record.gmail_message_id, "msg-123");
        assert_eq!(record.gmail_thread_id, "thread-456");
        assert_eq!(record.history_id.as_deref(), Some("789"));
        assert_eq!(record.snippet.as_deref(), Some("Snippet text"));
        assert_eq!(record.subject, "Test Subject");
        assert_eq!(record.from_address, "alice@example.com");
        assert_eq!(record.to_address, "bob@example.com");
        assert_eq!(record.cc_address.as_deref(), Some("cc@example.com"));
        assert_eq!(record.message_id, "<message@example.com>");
        assert_eq!(record.references_header.as_deref(), Some("<ref@example.com>"));
        assert_eq!(record.in_reply_to.as_deref(), Some("<reply@example.com>"));
        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2023, 9, 14, 12, 0, 0).unwrap()
        );
        assert_eq!(record.label_ids, vec!["INBOX".to_string()]);
        assert!(record.is_read);
        assert_eq!(record.member_id.as_deref(), Some("member-123"));
    }

    #[tokio::test]
    async fn missing_headers_get_documented_defaults() {
        let store = MockStore::default();
        let mut bare = message(&[]);
        bare.thread_id = None;
        bare.internal_date = None;
        bare.label_ids.clear();
        bare.snippet = None;

        let before = Utc::now();
        let record = build_inbox_record(&store, &bare, None).await;
        let after = Utc::now();

        assert_eq!(record.gmail_thread_id, "msg-123");
        assert_eq!(record.subject, MISSING_SUBJECT);
        assert_eq!(record.from_address, UNKNOWN_SENDER);
        assert_eq!(record.to_address, UNDISCLOSED_RECIPIENTS);
        assert_eq!(record.cc_address, None);
        assert_eq!(record.message_id, "msg-123");
        assert_eq!(record.references_header, None);
        assert_eq!(record.in_reply_to, None);
        assert!(record.date >= before && record.date <= after);
        assert!(record.is_read);
        assert_eq!(record.member_id, None);
    }

    #[tokio::test]
    async fn unparseable_date_falls_back_to_internal_timestamp() {
        let store = MockStore::default();
        let msg = message(&[("Date", "not a date")]);

        let record = build_inbox_record(&store, &msg, None).await;

        // 1694692800000 ms = 2023-09-14T12:00:00Z
        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2023, 9, 14, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn date_header_wins_over_internal_timestamp() {
        let store = MockStore::default();
        let msg = message(&[("Date", "Fri, 15 Sep 2023 08:30:00 +0200")]);

        let record = build_inbox_record(&store, &msg, None).await;

        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2023, 9, 15, 6, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn to_chain_lowercases_addressless_header_text() {
        let store = MockStore::default();
        let msg = message(&[("To", "  Undisclosed recipients:;  ")]);

        let record = build_inbox_record(&store, &msg, None).await;

        assert_eq!(record.to_address, "undisclosed recipients:;");
    }

    #[tokio::test]
    async fn unread_label_marks_record_unread() {
        let store = MockStore::default();
        let mut msg = message(&[]);
        msg.label_ids = vec!["INBOX".into(), "UNREAD".into()];

        let record = build_inbox_record(&store, &msg, None).await;

        assert!(!record.is_read);
    }

    #[tokio::test]
    async fn forced_override_fills_unresolved_member() {
        let store = MockStore::default();
        let record = build_inbox_record(&store, &full_message(), Some("member-9")).await;
        assert_eq!(record.member_id.as_deref(), Some("member-9"));
    }

    #[tokio::test]
    async fn resolved_member_beats_forced_override() {
        let store = MockStore::with_member("alice@example.com", "member-123");
        let record = build_inbox_record(&store, &full_message(), Some("member-9")).await;
        assert_eq!(record.member_id.as_deref(), Some("member-123"));
    }

    #[tokio::test]
    async fn lookup_error_leaves_member_unresolved() {
        let store = MockStore {
            fail_lookups: true,
            ..Default::default()
        };
        let record = build_inbox_record(&store, &full_message(), None).await;
        assert_eq!(record.member_id, None);
    }
}
