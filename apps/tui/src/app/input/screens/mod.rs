use crate::app::state::{App, AppScreen, ConfirmChoice};
use crossterm::event::KeyCode;

mod help;
mod history;
mod main;
mod settings;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    // Alerts block everything until dismissed
    if app.alert.is_some() {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            app.alert = None;
        }
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if let Some(choice) = app.confirm_clear {
        handle_confirm_clear_input(app, choice, key).await;
        return;
    }

    match app.screen {
        AppScreen::Main => main::handle_main_input(app, key).await,
        AppScreen::Settings => settings::handle_settings_input(app, key).await,
        AppScreen::History => history::handle_history_input(app, key),
    }
}

async fn handle_confirm_clear_input(app: &mut App, choice: ConfirmChoice, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.confirm_clear = Some(choice.toggle());
        }
        KeyCode::Enter => {
            app.resolve_clear_history(choice == ConfirmChoice::Clear)
                .await;
        }
        KeyCode::Char('y' | 'Y') => app.resolve_clear_history(true).await,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.resolve_clear_history(false).await,
        _ => {}
    }
}
