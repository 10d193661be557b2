mod dialogs;
mod menu;

use std::sync::Arc;

use uam_client::{
    ClientConfig, HttpUserService, StaticIdentity, UserManagementScreen, tracing::init_tracing,
};

use crate::dialogs::TerminalDialogs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env()?;

    init_tracing(config.env);

    let service = Arc::new(HttpUserService::from_config(&config)?);
    let identity = Arc::new(StaticIdentity::new(config.actor()));
    if config.actor_id.is_none() {
        tracing::warn!("UAM_ACTOR_ID is not set; self-action protection is disabled");
    }

    let mut screen = UserManagementScreen::new(service, identity, Arc::new(TerminalDialogs));

    tracing::info!(base_url = %config.api_base_url, "User administration console started");
    menu::run(&mut screen).await
}
