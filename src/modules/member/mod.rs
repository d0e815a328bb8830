// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{info, warn};

use crate::modules::store::InboxStore;

/// Maps a normalized sender address onto a member identifier.
///
/// Resolution is best-effort by design: a store error must not take the
/// message down with it, so every failure collapses to "unresolved" and the
/// record is persisted without a member.
pub async fn resolve_member_id<S: InboxStore>(store: &S, address: Option<&str>) -> Option<String> {
    let address = address?;

    match store.find_member_by_address(address).await {
        Ok(Some(member)) => {
            info!(member_id = %member.id, address = %address, "resolved member for address");
            Some(member.id)
        }
        Ok(None) => {
            info!(address = %address, "no member matches address");
            None
        }
        Err(error) => {
            warn!(address = %address, error = %error, "failed to resolve member for address");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_member_id;
    use crate::modules::store::testing::MockStore;

    #[tokio::test]
    async fn resolves_matching_member() {
        let store = MockStore::with_member("alice@example.com", "member-123");
        let member = resolve_member_id(&store, Some("alice@example.com")).await;
        assert_eq!(member.as_deref(), Some("member-123"));
    }

    #[tokio::test]
    async fn unknown_address_is_unresolved() {
        let store = MockStore::default();
        assert_eq!(resolve_member_id(&store, Some("ghost@example.com")).await, None);
    }

    #[tokio::test]
    async fn lookup_error_is_unresolved_not_fatal() {
        let store = MockStore {
            fail_lookups: true,
            ..Default::default()
        };
        assert_eq!(resolve_member_id(&store, Some("alice@example.com")).await, None);
    }

    #[tokio::test]
    async fn missing_address_short_circuits_without_lookup() {
        let store = MockStore {
            fail_lookups: true,
            ..Default::default()
        };
        assert_eq!(resolve_member_id(&store, None).await, None);
        assert_eq!(store.lookup_count(), 0);
    }
}
