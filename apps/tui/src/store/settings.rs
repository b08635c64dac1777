use crate::db::queries::{delete_key, get_json, set_json};
use crate::domain::Settings;
use crate::error::StoreError;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;

pub const DISTANCE_KEY: &str = "distance";
pub const PRICE_KEY: &str = "price";
pub const DIETARY_KEY: &str = "dietary";

/// User preferences persisted one key per field.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored values merged over the defaults. Never fails; unreadable keys use their default.
    pub async fn load(&self) -> Settings {
        let defaults = Settings::default();

        Settings {
            distance: self.load_key(DISTANCE_KEY, defaults.distance).await,
            price: self.load_key(PRICE_KEY, defaults.price).await,
            dietary: self.load_key(DIETARY_KEY, defaults.dietary).await,
        }
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        set_json(&self.pool, DISTANCE_KEY, &settings.distance).await?;
        set_json(&self.pool, PRICE_KEY, &settings.price).await?;
        set_json(&self.pool, DIETARY_KEY, &settings.dietary).await?;

        tracing::info!(
            distance = settings.distance,
            price = %settings.price,
            "Settings saved"
        );

        Ok(())
    }

    /// Forgets every stored preference so the next load yields defaults.
    pub async fn reset(&self) -> Result<(), StoreError> {
        for key in [DISTANCE_KEY, PRICE_KEY, DIETARY_KEY] {
            delete_key(&self.pool, key).await?;
        }
        Ok(())
    }

    async fn load_key<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match get_json(&self.pool, key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Ignoring stored {key}: {e}");
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::tests::setup_test_db;

    #[tokio::test]
    async fn test_load_defaults_from_empty_store() -> Result<(), Box<dyn std::error::Error>> {
        let store = SettingsStore::new(setup_test_db().await?);

        assert_eq!(store.load().await, Settings::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<(), Box<dyn std::error::Error>> {
        let store = SettingsStore::new(setup_test_db().await?);
        let settings = Settings {
            distance: 2.0,
            price: "1,4".to_string(),
            dietary: "vegetarian".to_string(),
        };

        store.save(&settings).await?;

        assert_eq!(store.load().await, settings);

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_store_merges_over_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        set_json(&pool, PRICE_KEY, "3,4").await?;
        // Wrong type under distance is ignored
        set_json(&pool, DISTANCE_KEY, "far").await?;

        let settings = SettingsStore::new(pool).load().await;

        assert_eq!(settings.price, "3,4");
        assert!((settings.distance - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.dietary, "");

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let store = SettingsStore::new(setup_test_db().await?);
        store
            .save(&Settings {
                distance: 3.0,
                ..Settings::default()
            })
            .await?;

        store.reset().await?;

        assert_eq!(store.load().await, Settings::default());

        Ok(())
    }
}
