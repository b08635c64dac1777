// Persistent stores backed by the key-value table

pub mod history;
pub mod settings;

pub use history::HistoryStore;
pub use settings::SettingsStore;
