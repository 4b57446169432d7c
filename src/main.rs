//! `SpendGuard` bootstrap binary.
//!
//! Initializes logging, loads the environment, and prepares the policy
//! engine's database so the embedding services (policy administration,
//! transaction evaluation) can connect.

use dotenvy::dotenv;
use spendguard::{config, errors::Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Connect and ensure the schema exists
    let url = config::database::get_database_url();
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!(database = %url, "policy engine database ready");

    Ok(())
}
