// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use rand::RngCore;

pub mod shutdown;

#[macro_export]
macro_rules! inboxsync_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

#[macro_export]
macro_rules! raise_error {
    ($msg:expr, $code:expr) => {
        $crate::modules::error::InboxSyncError::Generic {
            message: $msg,
            location: snafu::Location::default(),
            code: $code,
        }
    };
}

/// Short hex identifier correlating every log line of one request.
pub fn generate_request_id() -> String {
    let mut bytes = [0u8; 6];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::generate_request_id;

    #[test]
    fn request_ids_are_short_hex() {
        let id = generate_request_id();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
