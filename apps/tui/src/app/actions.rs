use crate::app::state::{App, AppScreen, ConfirmChoice, FetchResult, SettingsForm};
use crate::domain::{HistoryEntry, Settings};
use crate::wheel::{self, SpinState};
use tokio::task::JoinHandle;

impl App {
    /// Loads the saved settings and kicks off the first fetch.
    pub async fn initialize(&mut self) {
        self.settings = self.settings_store.load().await;
        self.settings_form = SettingsForm::from_settings(&self.settings);
        self.start_fetch();
    }

    /// Shows the loading overlay and fetches in the background.
    ///
    /// A fetch still in flight is aborted; only the latest one updates the wheel.
    pub fn start_fetch(&mut self) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }

        self.loading = true;
        let fetch = self.fetcher.fetch_restaurants();
        let reveal_delay = self.reveal_delay;

        self.fetch_task = Some(tokio::spawn(async move {
            let result = fetch.await;
            if result.is_ok() {
                tokio::time::sleep(reveal_delay).await;
            }
            result
        }));
    }

    /// Applies the background fetch once it has finished.
    ///
    /// The result waits while the wheel is spinning or a landed pick is unrecorded.
    pub async fn poll_fetch(&mut self) {
        if self.is_spinning() || self.pending_pick.is_some() {
            return;
        }

        let finished = self
            .fetch_task
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }

        let Some(task) = self.fetch_task.take() else {
            return;
        };

        match task.await {
            Ok(result) => self.apply_fetch_result(result),
            Err(e) => {
                tracing::error!("Fetch task failed: {e}");
                self.loading = false;
            }
        }
    }

    /// Hides the loading overlay and either refills the wheel or reports why not.
    pub fn apply_fetch_result(&mut self, result: FetchResult) {
        self.loading = false;

        match result {
            Ok(candidates) => {
                // A spin in the air keeps the option it was heading for
                if let Some(spin) = self.spin.take() {
                    self.rotation = spin.rotation();
                    self.pending_pick = self.wheel.get(spin.target()).cloned();
                }
                self.landed = None;
                self.wheel = wheel::select(&candidates, &mut rand::thread_rng());
                self.status_message = format!("{} restaurants on the wheel", self.wheel.len());
            }
            Err(e) if e.is_user_facing() => {
                tracing::warn!("{e}");
                self.alert = Some(e.to_string());
            }
            Err(e) => {
                tracing::error!("Error fetching restaurants: {e}");
                self.status_message = format!("Error: {e}");
            }
        }
    }

    pub fn start_spin(&mut self) {
        if self.is_spinning() {
            return;
        }

        if self.loading {
            self.status_message = "Still looking for restaurants...".to_string();
            return;
        }

        match SpinState::start(self.rotation, self.wheel.len(), &mut rand::thread_rng()) {
            Some(spin) => {
                self.spin = Some(spin);
                self.landed = None;
                self.status_message = "Spinning...".to_string();
            }
            None => {
                self.status_message = "Nothing to spin yet. Press r to search again.".to_string();
            }
        }
    }

    /// Records the option the wheel landed on and opens its map link.
    pub async fn record_pick(&mut self) {
        let Some(option) = self.pending_pick.take() else {
            return;
        };

        self.status_message = format!("Landed on {}!", option.name);
        self.landed = Some(option.clone());

        if let Err(e) = self
            .history_store
            .append(HistoryEntry::new_now(&option))
            .await
        {
            tracing::error!("Failed to save history: {e}");
            self.status_message = format!("Error: could not save history: {e}");
        }

        self.open_link(&option.map_link);
    }

    pub fn open_link(&mut self, url: &str) {
        if !self.open_links {
            tracing::debug!("Not opening {url}; links disabled");
            return;
        }

        match webbrowser::open(url) {
            Ok(()) => tracing::info!("Opened {url}"),
            Err(e) => {
                tracing::warn!("Failed to open {url}: {e}");
                self.status_message = format!("Error: could not open {url}: {e}");
            }
        }
    }

    pub async fn open_settings(&mut self) {
        self.settings = self.settings_store.load().await;
        self.settings_form = SettingsForm::from_settings(&self.settings);
        self.status_message = self.settings_form.price_notice().unwrap_or_default();
        self.screen = AppScreen::Settings;
    }

    pub fn close_settings(&mut self) {
        self.settings_form = SettingsForm::from_settings(&self.settings);
        self.screen = AppScreen::Main;
    }

    /// Persists the form, returns to Main and fetches with the new settings.
    pub async fn save_settings(&mut self) {
        let settings = match self.settings_form.to_settings() {
            Ok(settings) => settings,
            Err(message) => {
                self.status_message = format!("Error: {message}");
                return;
            }
        };

        if let Err(e) = self.settings_store.save(&settings).await {
            tracing::error!("Failed to save settings: {e}");
            self.status_message = format!("Error: could not save settings: {e}");
            return;
        }

        self.settings = settings;
        self.status_message = "Settings saved!".to_string();
        self.screen = AppScreen::Main;
        self.start_fetch();
    }

    pub async fn reset_settings(&mut self) {
        if let Err(e) = self.settings_store.reset().await {
            self.status_message = format!("Error: could not reset settings: {e}");
            return;
        }

        self.settings = Settings::default();
        self.settings_form = SettingsForm::from_settings(&self.settings);
        self.status_message = "Settings reset to defaults".to_string();
    }

    pub async fn open_history(&mut self) {
        self.status_message.clear();
        self.reload_history().await;
        self.selected_history_index = 0;
        self.screen = AppScreen::History;
    }

    pub fn close_history(&mut self) {
        self.confirm_clear = None;
        self.screen = AppScreen::Main;
    }

    pub const fn request_clear_history(&mut self) {
        self.confirm_clear = Some(ConfirmChoice::Cancel);
    }

    /// Closes the confirmation; clears the stored history only when confirmed.
    pub async fn resolve_clear_history(&mut self, confirmed: bool) {
        self.confirm_clear = None;
        if !confirmed {
            return;
        }

        if let Err(e) = self.history_store.clear().await {
            tracing::error!("Failed to clear history: {e}");
            self.status_message = format!("Error: could not clear history: {e}");
            return;
        }

        self.reload_history().await;
        self.selected_history_index = 0;
        self.status_message = "History Cleared".to_string();
    }

    pub fn open_selected_history_link(&mut self) {
        if let Some(url) = self
            .history
            .get(self.selected_history_index)
            .map(|entry| entry.map_link.clone())
        {
            self.open_link(&url);
        }
    }

    async fn reload_history(&mut self) {
        match self.history_store.list().await {
            Ok(history) => self.history = history,
            Err(e) => {
                tracing::error!("Failed to load history: {e}");
                self.history.clear();
                self.status_message = format!("Error: could not load history: {e}");
            }
        }
    }
}
