use thiserror::Error;

/// Why a restaurant fetch ended without filling the wheel.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Please enable location access to fetch restaurants.")]
    GeolocationDenied,

    #[error("No restaurants found! Try adjusting your settings.")]
    EmptySearchResult,

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Places API returned {status}: {message}")]
    Api { status: String, message: String },
}

impl FetchError {
    /// Errors the user is told about in a blocking alert. The rest only reach the log.
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::GeolocationDenied | Self::EmptySearchResult)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Could not encode stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}
