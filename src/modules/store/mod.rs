// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::InboxSyncResult;
use crate::modules::record::InboxRecord;
use async_trait::async_trait;
use serde::Deserialize;

pub mod supabase;
#[cfg(test)]
pub mod testing;

/// Single row returned by the member lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRow {
    pub id: String,
}

/// The two store operations the pipeline needs, independent of the
/// backing technology.
#[async_trait]
pub trait InboxStore {
    /// Case-insensitive match against the member's email or school email,
    /// bounded to one row.
    async fn find_member_by_address(&self, address: &str) -> InboxSyncResult<Option<MemberRow>>;

    /// Inserts the record, or overwrites the existing row sharing its
    /// message identifier.
    async fn upsert_record(&self, record: &InboxRecord) -> InboxSyncResult<()>;
}
