use crate::domain::RestaurantCandidate;
use crate::error::FetchError;
use crate::geo::{Geolocator, Locator};
use crate::places::{PlacesApi, PlacesClient, SearchRequest};
use crate::store::SettingsStore;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// The fetcher wired to the real locator and Places API.
pub type LiveFetcher = RestaurantFetcher<Geolocator, PlacesClient>;

pub type FetchFuture =
    Pin<Box<dyn Future<Output = Result<Vec<RestaurantCandidate>, FetchError>> + Send>>;

/// A fetch the app can hand to `tokio::spawn` without knowing its locator or search backend.
pub trait FetchRestaurants: fmt::Debug + Send + Sync {
    fn fetch_restaurants(&self) -> FetchFuture;
}

#[derive(Debug, Clone)]
pub struct RestaurantFetcher<L, P> {
    locator: L,
    places: P,
    settings: SettingsStore,
}

impl<L: Locator, P: PlacesApi> RestaurantFetcher<L, P> {
    pub const fn new(locator: L, places: P, settings: SettingsStore) -> Self {
        Self {
            locator,
            places,
            settings,
        }
    }

    /// Locates the user, searches nearby and returns the unique candidates in API order.
    pub async fn fetch(&self) -> Result<Vec<RestaurantCandidate>, FetchError> {
        let position = self.locator.current_position().await?;
        let settings = self.settings.load().await;
        let request = SearchRequest::new(position, &settings);

        let response = self.places.nearby_search(&request).await?;

        let results = match response.results {
            Some(results) if !results.is_empty() => results,
            _ => {
                tracing::error!("No restaurants found");
                return Err(FetchError::EmptySearchResult);
            }
        };

        let candidates = results
            .into_iter()
            .map(|place| place.into_candidate(&settings))
            .collect();
        let unique = dedup_by_name(candidates);

        tracing::info!(count = unique.len(), "Unique restaurants fetched");
        Ok(unique)
    }
}

impl<L, P> FetchRestaurants for RestaurantFetcher<L, P>
where
    L: Locator + Clone + fmt::Debug + Send + Sync + 'static,
    P: PlacesApi + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn fetch_restaurants(&self) -> FetchFuture {
        let fetcher = self.clone();
        Box::pin(async move { fetcher.fetch().await })
    }
}

/// Keeps the first candidate seen for each name.
pub fn dedup_by_name(candidates: Vec<RestaurantCandidate>) -> Vec<RestaurantCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.name.clone()))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::queries::tests::setup_test_db;
    use crate::domain::{Coordinates, Settings};
    use crate::places::PlacesResponse;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub(crate) struct FakeLocator(pub(crate) Option<Coordinates>);

    impl Locator for FakeLocator {
        async fn current_position(&self) -> Result<Coordinates, FetchError> {
            self.0.ok_or(FetchError::GeolocationDenied)
        }
    }

    #[derive(Debug, Clone)]
    pub(crate) struct FakePlaces {
        body: serde_json::Value,
        requests: Arc<Mutex<Vec<SearchRequest>>>,
    }

    impl FakePlaces {
        pub(crate) fn new(body: serde_json::Value) -> Self {
            Self {
                body,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl PlacesApi for FakePlaces {
        async fn nearby_search(
            &self,
            request: &SearchRequest,
        ) -> Result<PlacesResponse, FetchError> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            let response: PlacesResponse = serde_json::from_value(self.body.clone())?;
            response.check_status()?;
            Ok(response)
        }
    }

    pub(crate) fn places_body(names: &[&str]) -> serde_json::Value {
        let results: Vec<serde_json::Value> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::json!({
                    "name": name,
                    "price_level": 2,
                    "geometry": {"location": {"lat": 10.0, "lng": 20.0}},
                    "place_id": format!("id-{i}"),
                })
            })
            .collect();
        serde_json::json!({ "results": results, "status": "OK" })
    }

    pub(crate) const HERE: Coordinates = Coordinates {
        lat: 40.0,
        lng: -73.0,
    };

    fn candidate(name: &str, place_id: &str) -> RestaurantCandidate {
        RestaurantCandidate {
            name: name.to_string(),
            price: crate::domain::PriceLevel::Unknown,
            distance_label: "0.5".to_string(),
            coordinates: HERE,
            place_id: place_id.to_string(),
            map_link: crate::domain::map_link(place_id),
        }
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let input = vec![
            candidate("A", "1"),
            candidate("B", "2"),
            candidate("A", "3"),
            candidate("C", "4"),
            candidate("B", "5"),
        ];

        let unique = dedup_by_name(input);

        let names: Vec<&str> = unique.iter().map(|c| c.name.as_str()).collect();
        let ids: Vec<&str> = unique.iter().map(|c| c.place_id.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(ids, ["1", "2", "4"]);
    }

    #[tokio::test]
    async fn test_fetch_builds_request_from_settings() -> Result<(), Box<dyn std::error::Error>> {
        let settings = SettingsStore::new(setup_test_db().await?);
        settings
            .save(&Settings {
                distance: 2.0,
                price: "1,3".to_string(),
                dietary: String::new(),
            })
            .await?;
        let fetcher = RestaurantFetcher::new(
            FakeLocator(Some(HERE)),
            FakePlaces::new(places_body(&["Salad Spot"])),
            settings,
        );

        let candidates = fetcher.fetch().await?;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].price.to_string(), "$$");
        assert_eq!(candidates[0].distance_label, "2.0");

        let requests = fetcher
            .places
            .requests
            .lock()
            .map_err(|e| e.to_string())?
            .clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].location, HERE);
        assert!((requests[0].radius_meters - 2.0 * 1609.34).abs() < f64::EPSILON);
        assert_eq!((requests[0].min_price, requests[0].max_price), (1, 3));
        assert_eq!(requests[0].keyword, "healthy");
        assert_eq!(requests[0].place_type, "restaurant");

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_deduplicates_results() -> Result<(), Box<dyn std::error::Error>> {
        let fetcher = RestaurantFetcher::new(
            FakeLocator(Some(HERE)),
            FakePlaces::new(places_body(&["A", "B", "A", "C"])),
            SettingsStore::new(setup_test_db().await?),
        );

        let names: Vec<String> = fetcher.fetch().await?.into_iter().map(|c| c.name).collect();

        assert_eq!(names, ["A", "B", "C"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_results_raise_empty_condition() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        for body in [
            places_body(&[]),
            serde_json::json!({}),
            serde_json::json!({"status": "ZERO_RESULTS"}),
        ] {
            let fetcher = RestaurantFetcher::new(
                FakeLocator(Some(HERE)),
                FakePlaces::new(body),
                SettingsStore::new(pool.clone()),
            );

            assert!(matches!(
                fetcher.fetch().await,
                Err(FetchError::EmptySearchResult)
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_denied_location_skips_search() -> Result<(), Box<dyn std::error::Error>> {
        let fetcher = RestaurantFetcher::new(
            FakeLocator(None),
            FakePlaces::new(places_body(&["A"])),
            SettingsStore::new(setup_test_db().await?),
        );

        assert!(matches!(
            fetcher.fetch().await,
            Err(FetchError::GeolocationDenied)
        ));
        assert!(fetcher
            .places
            .requests
            .lock()
            .map_err(|e| e.to_string())?
            .is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_result_is_a_decode_failure() -> Result<(), Box<dyn std::error::Error>> {
        let fetcher = RestaurantFetcher::new(
            FakeLocator(Some(HERE)),
            FakePlaces::new(serde_json::json!({"results": [{"name": "No geometry"}]})),
            SettingsStore::new(setup_test_db().await?),
        );

        assert!(matches!(fetcher.fetch().await, Err(FetchError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_boxed_fetch_runs_on_a_spawned_task() -> Result<(), Box<dyn std::error::Error>> {
        let fetcher: Arc<dyn FetchRestaurants> = Arc::new(RestaurantFetcher::new(
            FakeLocator(Some(HERE)),
            FakePlaces::new(places_body(&["A", "B"])),
            SettingsStore::new(setup_test_db().await?),
        ));

        let candidates = tokio::spawn(fetcher.fetch_restaurants()).await??;

        assert_eq!(candidates.len(), 2);
        Ok(())
    }
}
