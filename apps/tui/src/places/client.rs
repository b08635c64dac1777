use crate::error::FetchError;
use crate::places::models::{PlacesResponse, SearchRequest};
use std::future::Future;

pub const NEARBY_SEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Anything that can answer a nearby search.
pub trait PlacesApi {
    fn nearby_search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<PlacesResponse, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(NEARBY_SEARCH_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl PlacesApi for PlacesClient {
    async fn nearby_search(&self, request: &SearchRequest) -> Result<PlacesResponse, FetchError> {
        if self.api_key.is_empty() {
            tracing::warn!("PLACES_API_KEY is not set; the search will most likely be denied");
        }

        tracing::debug!(
            location = %request.location,
            radius = request.radius_meters,
            minprice = request.min_price,
            maxprice = request.max_price,
            "Sending nearby search"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&request.query_pairs(&self.api_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Api {
                status: status.to_string(),
                message: body,
            });
        }

        let parsed: PlacesResponse = serde_json::from_str(&body)?;
        parsed.check_status()?;

        tracing::debug!(
            count = parsed.results.as_ref().map_or(0, Vec::len),
            "Nearby search answered"
        );

        Ok(parsed)
    }
}
