// App module for lunch_wheel
// Handles application state and the actions behind each key

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, ConfirmChoice, SettingsField, SettingsForm};
