//! Seed command - inserts the demo accounts.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AccountStore, Database};
use crate::services::seed_demo_accounts;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let store = AccountStore::new(db.get_connection());

    let created = seed_demo_accounts(&store).await?;
    tracing::info!("Seeding finished, {} account(s) created", created);

    Ok(())
}
