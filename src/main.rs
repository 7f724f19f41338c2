//! Bootstrap binary for the `ResiLog` data layer.
//!
//! Prepares a fresh deployment: initializes tracing, loads `.env`, connects
//! to the database and creates the tables, seeds the default logbook
//! sections for the active user when one is cached, and verifies that the
//! remote hospital directory is reachable.

use dotenvy::dotenv;
use resilog::{
    config,
    core::{logbook, session},
    directory::DirectoryClient,
    errors::{Error, Result},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables created."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed default logbook sections for the active user, if one is cached
    match session::resolve_current_user(&db, None).await {
        Ok(user_id) => {
            let sections = config::sections::load_default_config()
                .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;
            let created = logbook::seed_default_sections(&db, &user_id, &sections).await?;
            info!(%user_id, created, "Section seeding finished.");
        }
        Err(Error::NoActiveUser) => {
            warn!("No active user cached, skipping section seeding.");
        }
        Err(e) => return Err(e),
    }

    // 5. Verify the remote hospital directory is reachable
    match DirectoryClient::from_env() {
        Ok(client) => {
            let hospitals = client
                .fetch_hospitals()
                .await
                .inspect_err(|e| error!("Hospital directory fetch failed: {}", e))?;
            info!(count = hospitals.len(), "Hospital directory reachable.");
        }
        Err(_) => {
            warn!("Directory endpoints not configured, skipping reachability check.");
        }
    }

    Ok(())
}
