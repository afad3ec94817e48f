//! Restaurant keeps back office user accounts in a PostgreSQL `users` table.

#![forbid(unsafe_code)]
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod telemetry;
pub mod user;

use std::sync::Arc;

pub use error::{Error, ErrorKind, Result};

/// Missing `postgres` section.
#[derive(Debug, thiserror::Error)]
#[error("missing `postgres` entry on `config.yaml` file")]
pub struct MissingDatabase;

/// State shared by every caller.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub db: database::Database,
    pub users: Arc<dyn user::UserDao>,
    pub passwords: Arc<crypto::PasswordManager>,
}

/// Initialize the application state.
pub async fn initialize_state(
    config: Arc<config::Configuration>,
) -> std::result::Result<AppState, Box<dyn std::error::Error>> {
    let Some(postgres) = &config.postgres else {
        return Err(MissingDatabase.into());
    };

    let db = database::Database::new(postgres).await?;

    // execute migrations scripts on start.
    db.migrate().await?;

    let users = Arc::new(user::PgUserRepository::new(db.postgres.clone()));
    let passwords =
        Arc::new(crypto::PasswordManager::new(config.argon2.clone())?);

    Ok(AppState {
        config,
        db,
        users,
        passwords,
    })
}
