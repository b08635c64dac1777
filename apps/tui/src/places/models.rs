use crate::domain::{map_link, Coordinates, PriceLevel, RestaurantCandidate, Settings};
use crate::error::FetchError;
use serde::Deserialize;

pub const PLACE_TYPE: &str = "restaurant";
pub const SEARCH_KEYWORD: &str = "healthy";

/// Query parameters of a nearby search, minus the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub location: Coordinates,
    pub radius_meters: f64,
    pub place_type: &'static str,
    pub keyword: &'static str,
    pub min_price: u8,
    pub max_price: u8,
}

impl SearchRequest {
    pub fn new(location: Coordinates, settings: &Settings) -> Self {
        let price = settings.price_range();
        Self {
            location,
            radius_meters: settings.radius_meters(),
            place_type: PLACE_TYPE,
            keyword: SEARCH_KEYWORD,
            min_price: price.min,
            max_price: price.max,
        }
    }

    pub fn query_pairs(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("location", self.location.to_string()),
            ("radius", self.radius_meters.to_string()),
            ("type", self.place_type.to_string()),
            ("keyword", self.keyword.to_string()),
            ("minprice", self.min_price.to_string()),
            ("maxprice", self.max_price.to_string()),
            ("key", api_key.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlacesResponse {
    #[serde(default)]
    pub results: Option<Vec<PlaceResult>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl PlacesResponse {
    /// `OK` and `ZERO_RESULTS` are the only statuses that carry a usable result list.
    pub fn check_status(&self) -> Result<(), FetchError> {
        match self.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => Ok(()),
            Some(status) => Err(FetchError::Api {
                status: status.to_string(),
                message: self.error_message.clone().unwrap_or_default(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    #[serde(default)]
    pub price_level: Option<u8>,
    pub geometry: Geometry,
    pub place_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    pub fn into_candidate(self, settings: &Settings) -> RestaurantCandidate {
        RestaurantCandidate {
            map_link: map_link(&self.place_id),
            price: PriceLevel::from_api(self.price_level),
            distance_label: format!("{:.1}", settings.distance),
            coordinates: Coordinates {
                lat: self.geometry.location.lat,
                lng: self.geometry.location.lng,
            },
            name: self.name,
            place_id: self.place_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_follow_settings() {
        let settings = Settings {
            distance: 1.0,
            price: "1,4".to_string(),
            dietary: String::new(),
        };
        let request = SearchRequest::new(
            Coordinates {
                lat: 37.5,
                lng: -122.25,
            },
            &settings,
        );

        let pairs = request.query_pairs("secret");

        assert_eq!(
            pairs,
            vec![
                ("location", "37.5,-122.25".to_string()),
                ("radius", "1609.34".to_string()),
                ("type", "restaurant".to_string()),
                ("keyword", "healthy".to_string()),
                ("minprice", "1".to_string()),
                ("maxprice", "4".to_string()),
                ("key", "secret".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_results_without_price_level() -> Result<(), serde_json::Error> {
        let body = r#"{
            "results": [{
                "name": "Green Bowl",
                "geometry": {"location": {"lat": 1.5, "lng": 2.5}},
                "place_id": "p1"
            }],
            "status": "OK"
        }"#;

        let response: PlacesResponse = serde_json::from_str(body)?;
        let place = response.results.unwrap_or_default().remove(0);
        let candidate = place.into_candidate(&Settings::default());

        assert_eq!(candidate.name, "Green Bowl");
        assert_eq!(candidate.price.to_string(), "Unknown");
        assert_eq!(candidate.distance_label, "0.5");
        assert_eq!(
            candidate.map_link,
            "https://www.google.com/maps/place/?q=place_id:p1"
        );

        Ok(())
    }

    #[test]
    fn missing_results_field_decodes_as_none() -> Result<(), serde_json::Error> {
        let response: PlacesResponse = serde_json::from_str("{}")?;
        assert!(response.results.is_none());
        assert!(response.check_status().is_ok());
        Ok(())
    }

    #[test]
    fn rejects_error_status() -> Result<(), serde_json::Error> {
        let response: PlacesResponse = serde_json::from_str(
            r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "bad key"}"#,
        )?;

        match response.check_status() {
            Err(FetchError::Api { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected status check result: {other:?}"),
        }

        Ok(())
    }
}
