// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod geo;
pub mod places;
pub mod store;
pub mod terminal;
pub mod ui;
pub mod wheel;

pub use domain::{HistoryEntry, RestaurantCandidate, Settings, WheelOption};
pub use error::{FetchError, StoreError};
