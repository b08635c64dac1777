use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Sets up the database by creating the key-value table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates the pool for the configured database URL, creating the file if needed
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::info!("Initializing database with URL: {database_url}");

    create_database_pool_with_url(database_url).await.map_err(|e| {
        tracing::error!("Failed to open database: {e}");
        color_eyre::eyre::eyre!("Failed to open database {database_url}: {e}")
    })
}

pub async fn create_database_pool_with_url(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;

    Ok(pool)
}
