// Copyright © 2025 inboxsync.dev
// Licensed under InboxSync License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod common;
pub mod envelope;
pub mod error;
pub mod gmail;
pub mod logger;
pub mod member;
pub mod oauth2;
pub mod record;
pub mod rest;
pub mod settings;
pub mod store;
pub mod sync;
pub mod utils;
