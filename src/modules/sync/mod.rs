// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use tracing::{info, warn};

use crate::modules::error::InboxSyncResult;
use crate::modules::gmail::MailSource;
use crate::modules::record::build_inbox_record;
use crate::modules::store::InboxStore;

/// Aggregate counts returned to the caller after one pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SyncReport {
    pub processed: u64,
    pub failures: u64,
}

enum MessageOutcome {
    Persisted,
    /// The forced override names a different member than the message
    /// resolved to; the record belongs to that member's thread and must
    /// not be cross-assigned.
    Skipped,
}

/// Drives one full synchronization pass: page loop, per-message fetch /
/// build / upsert, per-message failure isolation.
///
/// Listing errors abort the run. Anything that goes wrong while handling a
/// single message increments `failures` and processing moves on to the
/// next message; records upserted before an abort stay persisted.
pub async fn run_sync<M: MailSource, S: InboxStore>(
    source: &M,
    store: &S,
    page_size: u32,
    forced_member_id: Option<&str>,
) -> InboxSyncResult<SyncReport> {
    let mut report = SyncReport::default();
    let mut skipped = 0u64;
    let mut page_token: Option<String> = None;

    loop {
        let page = source.list_messages(page_token.as_deref(), page_size).await?;
        page_token = page.next_page_token;

        if let Some(messages) = page.messages {
            for index in messages {
                match sync_message(source, store, &index.id, forced_member_id).await {
                    Ok(MessageOutcome::Persisted) => report.processed += 1,
                    Ok(MessageOutcome::Skipped) => skipped += 1,
                    Err(error) => {
                        report.failures += 1;
                        warn!(
                            message_id = %index.id,
                            error = %error,
                            "message sync failed, continuing with next message"
                        );
                    }
                }
            }
        }

        if page_token.is_none() {
            break;
        }
    }

    if skipped > 0 {
        info!(skipped, "messages left untouched for other members");
    }
    Ok(report)
}

async fn sync_message<M: MailSource, S: InboxStore>(
    source: &M,
    store: &S,
    id: &str,
    forced_member_id: Option<&str>,
) -> InboxSyncResult<MessageOutcome> {
    let message = source.get_message(id).await?;
    let record = build_inbox_record(store, &message, forced_member_id).await;

    if let Some(forced) = forced_member_id {
        // The builder already fills an unresolved member with the override,
        // so a mismatch here means the sender resolved to someone else.
        if record.member_id.as_deref() != Some(forced) {
            info!(message_id = %id, "message belongs to another member, skipping");
            return Ok(MessageOutcome::Skipped);
        }
    }

    store.upsert_record(&record).await?;
    Ok(MessageOutcome::Persisted)
}
