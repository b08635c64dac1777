use crate::app::input::helpers::cycle_index;
use crate::config::AppConfig;
use crate::domain::{
    HistoryEntry, PriceRange, RestaurantCandidate, Settings, WheelOption, PRICE_CHOICES,
};
use crate::error::FetchError;
use crate::fetcher::{FetchRestaurants, LiveFetcher};
use crate::geo::Geolocator;
use crate::places::PlacesClient;
use crate::store::{HistoryStore, SettingsStore};
use crate::wheel::SpinState;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tokio::task::JoinHandle;

pub type FetchResult = Result<Vec<RestaurantCandidate>, FetchError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Main,
    Settings,
    History,
}

/// Which field is focused on the Settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Distance,
    Price,
    Dietary,
}

impl SettingsField {
    pub const fn next(self) -> Self {
        match self {
            Self::Distance => Self::Price,
            Self::Price => Self::Dietary,
            Self::Dietary => Self::Distance,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Distance => Self::Dietary,
            Self::Price => Self::Distance,
            Self::Dietary => Self::Price,
        }
    }

    pub const fn is_text(self) -> bool {
        matches!(self, Self::Distance | Self::Dietary)
    }
}

/// Holds the unsaved state of the Settings screen
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub field: SettingsField,
    pub distance: String,
    pub price_index: usize,
    pub dietary: String,
    pub editing: bool,
    /// Stored price value that had no matching choice
    pub replaced_price: Option<String>,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        // Match on the parsed band so "4;4" still selects "4,4"
        let stored_band = PriceRange::parse_stored(&settings.price)
            .map(|range| format!("{},{}", range.min, range.max));
        let matched = stored_band
            .as_deref()
            .and_then(|band| PRICE_CHOICES.iter().position(|choice| *choice == band));
        let price_index = matched
            .or_else(|| {
                PRICE_CHOICES
                    .iter()
                    .position(|choice| *choice == crate::domain::DEFAULT_PRICE)
            })
            .unwrap_or(0);

        Self {
            field: SettingsField::Distance,
            distance: settings.distance.to_string(),
            price_index,
            dietary: settings.dietary.clone(),
            editing: false,
            replaced_price: matched.is_none().then(|| settings.price.clone()),
        }
    }

    /// Status line text when the stored price band could not be shown as-is.
    pub fn price_notice(&self) -> Option<String> {
        self.replaced_price.as_ref().map(|stored| {
            format!(
                "Stored price band \"{stored}\" is not a valid choice; showing {} instead",
                self.price()
            )
        })
    }

    pub fn price(&self) -> &'static str {
        PRICE_CHOICES
            .get(self.price_index)
            .copied()
            .unwrap_or(crate::domain::DEFAULT_PRICE)
    }

    pub const fn next_price(&mut self) {
        self.price_index = cycle_index(self.price_index, PRICE_CHOICES.len(), true);
    }

    pub const fn prev_price(&mut self) {
        self.price_index = cycle_index(self.price_index, PRICE_CHOICES.len(), false);
    }

    /// The text buffer behind the focused field, if it is a text field
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            SettingsField::Distance => Some(&mut self.distance),
            SettingsField::Dietary => Some(&mut self.dietary),
            SettingsField::Price => None,
        }
    }

    pub fn to_settings(&self) -> Result<Settings, String> {
        let distance: f64 = self
            .distance
            .trim()
            .parse()
            .map_err(|_| format!("Distance \"{}\" is not a number", self.distance.trim()))?;

        let settings = Settings {
            distance,
            price: self.price().to_string(),
            dietary: self.dietary.trim().to_string(),
        };
        settings.validate()?;

        Ok(settings)
    }
}

/// Focused button of the clear-history confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Clear,
}

impl ConfirmChoice {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Cancel => Self::Clear,
            Self::Clear => Self::Cancel,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub loading: bool,
    pub alert: Option<String>,
    pub confirm_clear: Option<ConfirmChoice>,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber_state: ThrobberState,
    pub wheel: Vec<WheelOption>,
    pub rotation: f64,
    pub spin: Option<SpinState>,
    pub landed: Option<WheelOption>,
    pub pending_pick: Option<WheelOption>,
    pub settings: Settings,
    pub settings_form: SettingsForm,
    pub history: Vec<HistoryEntry>,
    pub selected_history_index: usize,
    pub settings_store: SettingsStore,
    pub history_store: HistoryStore,
    pub fetcher: Arc<dyn FetchRestaurants>,
    pub fetch_task: Option<JoinHandle<FetchResult>>,
    pub reveal_delay: Duration,
    pub open_links: bool,
}

impl App {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        let fetcher = LiveFetcher::new(
            Geolocator::from_config(config.location),
            PlacesClient::new(config.api_key.clone()),
            SettingsStore::new(pool.clone()),
        );
        Self::with_fetcher(config, pool, Arc::new(fetcher))
    }

    /// Builds the app around any fetcher, e.g. one backed by fixed search results.
    pub fn with_fetcher(
        config: &AppConfig,
        pool: SqlitePool,
        fetcher: Arc<dyn FetchRestaurants>,
    ) -> Self {
        let settings_store = SettingsStore::new(pool.clone());
        let settings = Settings::default();

        Self {
            running: true,
            screen: AppScreen::Main,
            loading: true,
            alert: None,
            confirm_clear: None,
            show_help: false,
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber_state: ThrobberState::default(),
            wheel: Vec::new(),
            rotation: 0.0,
            spin: None,
            landed: None,
            pending_pick: None,
            settings_form: SettingsForm::from_settings(&settings),
            settings,
            history: Vec::new(),
            selected_history_index: 0,
            settings_store,
            history_store: HistoryStore::new(pool),
            fetcher,
            fetch_task: None,
            reveal_delay: config.reveal_delay,
            open_links: config.open_links,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.tick(delta);
    }

    /// Advances animations by `delta`; a spin that finishes queues its option as the pick.
    pub fn tick(&mut self, delta: Duration) {
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.loading {
            self.throbber_state.calc_next();
        }

        let Some(spin) = self.spin.as_mut() else {
            return;
        };

        if let Some(index) = spin.advance(delta) {
            self.rotation = spin.rotation();
            self.spin = None;
            self.pending_pick = self.wheel.get(index).cloned();
        }
    }

    /// Rotation to draw, in turns
    pub fn current_rotation(&self) -> f64 {
        self.spin.as_ref().map_or(self.rotation, SpinState::rotation)
    }

    pub const fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn select_next_history(&mut self) {
        if self.selected_history_index + 1 < self.history.len() {
            self.selected_history_index += 1;
        }
    }

    pub const fn select_prev_history(&mut self) {
        self.selected_history_index = self.selected_history_index.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_price(price: &str) -> Settings {
        Settings {
            price: price.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn form_selects_stored_price_band() {
        let form = SettingsForm::from_settings(&with_price("1,4"));
        assert_eq!(form.price(), "1,4");
        assert!(form.price_notice().is_none());

        let form = SettingsForm::from_settings(&with_price("4;4"));
        assert_eq!(form.price(), "4,4");
        assert!(form.price_notice().is_none());
    }

    #[test]
    fn form_reports_replaced_price_band() {
        for stored in ["4,1", "cheap"] {
            let form = SettingsForm::from_settings(&with_price(stored));

            assert_eq!(form.price(), "2,3");
            let notice = form.price_notice().unwrap_or_default();
            assert!(notice.contains(stored), "{notice}");
        }
    }
}
