use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters in one mile, as used by the Places API radius parameter.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Upper bound of options drawn onto the wheel per fetch.
pub const MAX_WHEEL_OPTIONS: usize = 8;

/// Upper bound of stored history entries.
pub const MAX_HISTORY_ENTRIES: usize = 20;

pub const DEFAULT_DISTANCE_MILES: f64 = 0.5;
pub const DEFAULT_PRICE: &str = "2,3";

/// Price band choices offered on the settings screen.
pub const PRICE_CHOICES: [&str; 10] = [
    "1,1", "1,2", "1,3", "1,4", "2,2", "2,3", "2,4", "3,3", "3,4", "4,4",
];

const MAP_LINK_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Builds the Google Maps link for a place. Stored history depends on this exact format.
pub fn map_link(place_id: &str) -> String {
    format!("{MAP_LINK_PREFIX}{place_id}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub distance: f64,
    pub price: String,
    pub dietary: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE_MILES,
            price: DEFAULT_PRICE.to_string(),
            dietary: String::new(),
        }
    }
}

impl Settings {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::from_stored(&self.price)
    }

    pub fn radius_meters(&self) -> f64 {
        miles_to_meters(self.distance)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err("Distance must be a positive number of miles".to_string());
        }

        match PriceRange::parse_stored(&self.price) {
            None => {
                return Err(format!(
                    "Price band must look like \"min,max\" with levels 1-4, got \"{}\"",
                    self.price
                ));
            }
            Some(range) if range.min > range.max => {
                return Err(format!(
                    "Minimum price {} is above maximum {}",
                    range.min, range.max
                ));
            }
            Some(_) => {}
        }

        Ok(())
    }
}

/// Minimum and maximum Places price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u8,
    pub max: u8,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

impl PriceRange {
    /// Reads the band from the stored "min,max" string.
    ///
    /// Only the first and third characters are looked at, so bounds are single digits.
    /// Anything unusable falls back to the default band.
    pub fn from_stored(value: &str) -> Self {
        Self::parse_stored(value).unwrap_or_default()
    }

    pub fn parse_stored(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        let min = chars.next().and_then(price_digit)?;
        let max = chars.nth(1).and_then(price_digit)?;
        Some(Self { min, max })
    }
}

fn price_digit(ch: char) -> Option<u8> {
    ch.to_digit(10)
        .and_then(|digit| u8::try_from(digit).ok())
        .filter(|level| (1..=4).contains(level))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLevel {
    Unknown,
    Level(u8),
}

impl PriceLevel {
    /// Zero and absent levels both render as unknown.
    pub fn from_api(level: Option<u8>) -> Self {
        match level {
            Some(level @ 1..=4) => Self::Level(level),
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Level(level) => write!(f, "{}", "$".repeat(usize::from(*level))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Parses "lat,lng" as accepted by `--location`.
    pub fn parse(value: &str) -> Option<Self> {
        let (lat, lng) = value.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }

        Some(Self { lat, lng })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantCandidate {
    pub name: String,
    pub price: PriceLevel,
    pub distance_label: String,
    pub coordinates: Coordinates,
    pub place_id: String,
    pub map_link: String,
}

/// Display projection of a candidate placed on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelOption {
    pub name: String,
    pub map_link: String,
}

impl From<&RestaurantCandidate> for WheelOption {
    fn from(candidate: &RestaurantCandidate) -> Self {
        Self {
            name: candidate.name.clone(),
            map_link: candidate.map_link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "googleMapsLink")]
    pub map_link: String,
}

impl HistoryEntry {
    /// Stamps the landed option with the current local date and time.
    pub fn new_now(option: &WheelOption) -> Self {
        let now = chrono::Local::now();
        Self {
            name: option.name.clone(),
            date: now.format("%-m/%-d/%Y").to_string(),
            time: now.format("%I:%M %p").to_string(),
            map_link: option.map_link.clone(),
        }
    }
}
