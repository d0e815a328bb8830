// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use regex::Regex;
use std::sync::LazyLock;

static BARE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+").unwrap());

/// Parses a raw address-list header into lower-cased bare addresses,
/// unique by string equality, in order of first appearance.
///
/// Segments that carry no recognizable address (e.g. a bare display name)
/// are kept as their lower-cased trimmed text rather than dropped, so the
/// caller still sees what the header said.
pub fn parse_email_addresses(raw: &str) -> Vec<String> {
    let mut addresses: Vec<String> = Vec::new();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let address = BARE_ADDRESS
            .find(segment)
            .map(|found| found.as_str().to_ascii_lowercase())
            .unwrap_or_else(|| segment.to_ascii_lowercase());
        if !addresses.contains(&address) {
            addresses.push(address);
        }
    }
    addresses
}

/// First address of the parsed list, or nothing.
pub fn first_email_address(raw: &str) -> Option<String> {
    parse_email_addresses(raw).into_iter().next()
}
