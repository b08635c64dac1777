use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_history_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.close_history(),
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Up => app.select_prev_history(),
        KeyCode::Down => app.select_next_history(),
        KeyCode::Home => {
            app.selected_history_index = 0;
        }
        KeyCode::End => {
            app.selected_history_index = app.history.len().saturating_sub(1);
        }
        KeyCode::Enter => app.open_selected_history_link(),
        KeyCode::Char('c') => {
            if app.history.is_empty() {
                app.status_message = "History is already empty".to_string();
            } else {
                app.request_clear_history();
            }
        }
        _ => {}
    }
}
