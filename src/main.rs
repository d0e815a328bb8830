use mimalloc::MiMalloc;
use modules::{error::InboxSyncResult, logger, rest::start_http_server, settings::cli::SETTINGS};
use tracing::info;

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
  ___       _               ____
 |_ _|_ __ | |__   _____  _/ ___| _   _ _ __   ___
  | || '_ \| '_ \ / _ \ \/ \___ \| | | | '_ \ / __|
  | || | | | |_) | (_) >  < ___) | |_| | | | | (__
 |___|_| |_|_.__/ \___/_/\_\____/ \__, |_| |_|\___|
                                  |___/
"#;

#[tokio::main]
async fn main() -> InboxSyncResult<()> {
    logger::initialize_logging();
    info!("{}", LOGO);
    info!("Starting inboxsync");
    info!("Version:  {}", inboxsync_version!());

    if let Err(error) = SETTINGS.validate() {
        eprintln!("{:?}", error);
        return Err(error);
    }

    start_http_server().await
}
