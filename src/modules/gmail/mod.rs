// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::InboxSyncResult;
use async_trait::async_trait;
use model::{MessageList, MessageMeta};

pub mod client;
pub mod model;

/// Read-only view of the remote mailbox. The production implementation
/// talks to the Gmail REST API; tests drive the orchestrator with a
/// scripted fake.
#[async_trait]
pub trait MailSource {
    /// One page of message identifiers, continued from `page_token`.
    async fn list_messages(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> InboxSyncResult<MessageList>;

    /// Header metadata for a single message.
    async fn get_message(&self, id: &str) -> InboxSyncResult<MessageMeta>;
}
