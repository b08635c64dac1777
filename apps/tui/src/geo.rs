use crate::domain::Coordinates;
use crate::error::FetchError;
use serde::Deserialize;
use std::future::Future;

pub const IP_LOOKUP_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Source of the user's current position.
pub trait Locator {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, FetchError>> + Send;
}

/// Position from `--location`/`LUNCH_WHEEL_LOCATION`, or an approximate one from the public IP.
#[derive(Debug, Clone)]
pub enum Geolocator {
    Fixed(Coordinates),
    IpLookup(IpLocator),
}

impl Geolocator {
    pub fn from_config(location: Option<Coordinates>) -> Self {
        location.map_or_else(|| Self::IpLookup(IpLocator::new()), Self::Fixed)
    }
}

impl Locator for Geolocator {
    async fn current_position(&self) -> Result<Coordinates, FetchError> {
        match self {
            Self::Fixed(coordinates) => Ok(*coordinates),
            Self::IpLookup(locator) => locator.current_position().await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_url(IP_LOOKUP_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn lookup(&self) -> Result<IpLookupResponse, reqwest::Error> {
        self.http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<IpLookupResponse>()
            .await
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator for IpLocator {
    /// Every failure here means "no location", whatever the cause.
    async fn current_position(&self) -> Result<Coordinates, FetchError> {
        let response = self.lookup().await.map_err(|e| {
            tracing::error!("Geolocation error: {e}");
            FetchError::GeolocationDenied
        })?;

        match (response.status.as_str(), response.lat, response.lon) {
            ("success", Some(lat), Some(lng)) => {
                tracing::debug!(lat, lng, "Located via IP lookup");
                Ok(Coordinates { lat, lng })
            }
            _ => {
                tracing::error!(
                    "Geolocation error: {}",
                    response.message.as_deref().unwrap_or("lookup failed")
                );
                Err(FetchError::GeolocationDenied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location_is_returned_as_is() -> Result<(), FetchError> {
        let here = Coordinates {
            lat: 51.5,
            lng: -0.12,
        };

        let position = Geolocator::from_config(Some(here)).current_position().await?;

        assert_eq!(position, here);
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_lookup_is_denied() {
        let locator = IpLocator::with_url("http://127.0.0.1:9/json");

        let result = locator.current_position().await;

        assert!(matches!(result, Err(FetchError::GeolocationDenied)));
    }

    #[test]
    fn missing_location_uses_ip_lookup() {
        assert!(matches!(
            Geolocator::from_config(None),
            Geolocator::IpLookup(_)
        ));
    }
}
