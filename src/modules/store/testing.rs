use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::modules::error::{code::ErrorCode, InboxSyncResult};
use crate::modules::record::InboxRecord;
use crate::modules::store::{InboxStore, MemberRow};
use crate::raise_error;

/// In-memory stand-in for the member/inbox store.
#[derive(Default)]
pub struct MockStore {
    /// Normalized address -> member id.
    pub members: HashMap<String, String>,
    /// When set, every member lookup reports a store error.
    pub fail_lookups: bool,
    /// Upserts are refused for these message identifiers.
    pub reject_ids: HashSet<String>,
    pub lookups: Mutex<Vec<String>>,
    pub upserts: Mutex<Vec<InboxRecord>>,
}

impl MockStore {
    pub fn with_member(address: &str, member_id: &str) -> Self {
        let mut store = Self::default();
        store
            .members
            .insert(address.to_ascii_lowercase(), member_id.to_owned());
        store
    }

    pub fn upserted(&self) -> Vec<InboxRecord> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl InboxStore for MockStore {
    async fn find_member_by_address(&self, address: &str) -> InboxSyncResult<Option<MemberRow>> {
        self.lookups.lock().unwrap().push(address.to_owned());
        if self.fail_lookups {
            return Err(raise_error!(
                "member lookup refused".into(),
                ErrorCode::StoreQueryFailed
            ));
        }
        Ok(self
            .members
            .get(&address.to_ascii_lowercase())
            .map(|id| MemberRow { id: id.clone() }))
    }

    async fn upsert_record(&self, record: &InboxRecord) -> InboxSyncResult<()> {
        if self.reject_ids.contains(&record.gmail_message_id) {
            return Err(raise_error!(
                format!("record upsert refused for {}", record.gmail_message_id),
                ErrorCode::StoreUpsertFailed
            ));
        }
        self.upserts.lock().unwrap().push(record.clone());
        Ok(())
    }
}
