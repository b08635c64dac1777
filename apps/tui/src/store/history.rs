use crate::db::queries::{get_json, set_json};
use crate::domain::{HistoryEntry, MAX_HISTORY_ENTRIES};
use crate::error::StoreError;
use sqlx::SqlitePool;

pub const HISTORY_KEY: &str = "restaurantHistory";

/// Most-recent-first log of landed picks, capped at `MAX_HISTORY_ENTRIES`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
}

impl HistoryStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn append(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut history = self.list().await?;
        history.insert(0, entry);
        history.truncate(MAX_HISTORY_ENTRIES);

        set_json(&self.pool, HISTORY_KEY, &history).await?;

        tracing::info!(name = %history[0].name, "Restaurant saved to history");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(get_json(&self.pool, HISTORY_KEY).await?.unwrap_or_default())
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        set_json(&self.pool, HISTORY_KEY, &Vec::<HistoryEntry>::new()).await?;
        tracing::info!("History cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::tests::setup_test_db;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            name: format!("Restaurant {n}"),
            date: "1/2/2025".to_string(),
            time: "12:30 PM".to_string(),
            map_link: crate::domain::map_link(&format!("place-{n}")),
        }
    }

    #[tokio::test]
    async fn test_list_is_empty_without_history() -> Result<(), Box<dyn std::error::Error>> {
        let store = HistoryStore::new(setup_test_db().await?);

        assert!(store.list().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_append_puts_newest_first() -> Result<(), Box<dyn std::error::Error>> {
        let store = HistoryStore::new(setup_test_db().await?);

        store.append(entry(1)).await?;
        store.append(entry(2)).await?;

        let history = store.list().await?;
        assert_eq!(history, vec![entry(2), entry(1)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_twenty_five_appends_keep_latest_twenty() -> Result<(), Box<dyn std::error::Error>>
    {
        let store = HistoryStore::new(setup_test_db().await?);

        for n in 1..=25 {
            store.append(entry(n)).await?;
            let history = store.list().await?;
            assert!(history.len() <= MAX_HISTORY_ENTRIES);
            assert_eq!(history[0], entry(n));
        }

        let history = store.list().await?;
        assert_eq!(history.len(), 20);
        let expected: Vec<HistoryEntry> = (6..=25).rev().map(entry).collect();
        assert_eq!(history, expected);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_empties_history() -> Result<(), Box<dyn std::error::Error>> {
        let store = HistoryStore::new(setup_test_db().await?);
        store.append(entry(1)).await?;

        store.clear().await?;

        assert!(store.list().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_reads_history_with_google_maps_link_field() -> Result<(), Box<dyn std::error::Error>>
    {
        let pool = setup_test_db().await?;
        let stored = serde_json::json!([{
            "name": "Tender Greens",
            "date": "5/1/2025",
            "time": "01:15 PM",
            "googleMapsLink": "https://www.google.com/maps/place/?q=place_id:xyz"
        }]);
        set_json(&pool, HISTORY_KEY, &stored).await?;

        let history = HistoryStore::new(pool).list().await?;

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "Tender Greens");
        assert_eq!(
            history[0].map_link,
            "https://www.google.com/maps/place/?q=place_id:xyz"
        );

        Ok(())
    }
}
