use sqlx::FromRow;

/// A raw row of the key-value table; `value` holds JSON
#[derive(Debug, FromRow, Clone)]
pub struct KvRecord {
    pub key: String,
    pub value: String,
    pub updated: String,
}
