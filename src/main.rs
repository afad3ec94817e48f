use std::path::PathBuf;

use restaurant::config::Configuration;
use restaurant::{initialize_state, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // first argument may point to another configuration file.
    let mut config = Configuration::default();
    if let Some(path) = std::env::args().nth(1) {
        config = config.path(PathBuf::from(path));
    }
    let config = config.read();

    telemetry::init(&config.log)?;

    let state = match initialize_state(config).await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "cannot initialize state");
            return Err(err);
        },
    };

    let users = state.users.select_all().await?;
    tracing::info!(count = users.len(), "users table ready");

    Ok(())
}
