// Google Places nearby-search client and payloads

pub mod client;
pub mod models;

pub use client::{PlacesApi, PlacesClient, NEARBY_SEARCH_URL};
pub use models::{PlaceResult, PlacesResponse, SearchRequest};
