use crate::app::state::App;
use crossterm::event::KeyCode;

pub async fn handle_main_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(' ') | KeyCode::Enter => app.start_spin(),
        KeyCode::Char('o') => app.open_settings().await,
        KeyCode::Char('h') => app.open_history().await,
        KeyCode::Char('r') => {
            if !app.is_spinning() {
                app.status_message.clear();
                app.start_fetch();
            }
        }
        KeyCode::Char('l') => {
            if let Some(url) = app.landed.as_ref().map(|option| option.map_link.clone()) {
                app.open_link(&url);
            }
        }
        _ => {}
    }
}
