// UI module for lunch_wheel
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Main => screens::main::render_main(app, f),
        AppScreen::Settings => screens::settings::render_settings(app, f),
        AppScreen::History => screens::history::render_history(app, f),
    }

    // Overlays, topmost last
    if let Some(choice) = app.confirm_clear {
        widgets::popup::render_confirm_clear(f, choice);
    }
    if let Some(message) = &app.alert {
        widgets::popup::render_alert(f, message);
    }
    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
