use crate::db::models::KvRecord;
use crate::error::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{query, query_as, SqlitePool};

/// Retrieves the raw row stored under `key`
pub async fn get_record(pool: &SqlitePool, key: &str) -> Result<Option<KvRecord>, sqlx::Error> {
    query_as::<_, KvRecord>("SELECT key, value, updated FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Retrieves and decodes the JSON value stored under `key`
pub async fn get_json<T: DeserializeOwned>(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(record) = get_record(pool, key).await? else {
        return Ok(None);
    };

    Ok(Some(serde_json::from_str(&record.value)?))
}

/// Stores `value` as JSON under `key`, replacing any previous value
pub async fn set_json<T: Serialize + ?Sized>(
    pool: &SqlitePool,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value)?;
    let updated = chrono::Utc::now().to_rfc3339();

    query(
        "INSERT INTO kv_store (key, value, updated) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key)
    .bind(encoded)
    .bind(updated)
    .execute(pool)
    .await?;

    Ok(())
}

/// Removes `key` entirely
pub async fn delete_key(pool: &SqlitePool, key: &str) -> Result<(), sqlx::Error> {
    query("DELETE FROM kv_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}
