use anyhow::Context;

use crate::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = config::config();

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to apply migrations")?;
    db.close().await;

    tracing::info!("Migrations applied");
    Ok(())
}
