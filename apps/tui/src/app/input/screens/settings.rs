use crate::app::state::{App, SettingsField};
use crossterm::event::KeyCode;

pub async fn handle_settings_input(app: &mut App, key: KeyCode) {
    if app.settings_form.editing {
        handle_text_editing(app, key);
        return;
    }

    match key {
        KeyCode::Esc => app.close_settings(),
        KeyCode::Up => {
            app.settings_form.field = app.settings_form.field.prev();
        }
        KeyCode::Down | KeyCode::Tab => {
            app.settings_form.field = app.settings_form.field.next();
        }
        KeyCode::Left if app.settings_form.field == SettingsField::Price => {
            app.settings_form.prev_price();
        }
        KeyCode::Right if app.settings_form.field == SettingsField::Price => {
            app.settings_form.next_price();
        }
        KeyCode::Enter => {
            if app.settings_form.field.is_text() {
                app.settings_form.editing = true;
            } else {
                app.settings_form.next_price();
            }
        }
        KeyCode::Char('s' | 'S') => app.save_settings().await,
        KeyCode::Char('d') => app.reset_settings().await,
        _ => {}
    }
}

fn handle_text_editing(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc => {
            app.settings_form.editing = false;
        }
        KeyCode::Backspace => {
            if let Some(text) = app.settings_form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(ch) => {
            let numeric_only = app.settings_form.field == SettingsField::Distance;
            if let Some(text) = app.settings_form.focused_text_mut() {
                if !numeric_only || ch.is_ascii_digit() || ch == '.' {
                    text.push(ch);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::tests::{finish_fetch, test_app};
    use crate::app::AppScreen;

    #[tokio::test]
    async fn test_edit_distance_and_save() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        app.open_settings().await;

        handle_settings_input(&mut app, KeyCode::Enter).await;
        assert!(app.settings_form.editing);
        for key in [
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Char('3'),
            KeyCode::Char('x'),
        ] {
            handle_settings_input(&mut app, key).await;
        }
        handle_settings_input(&mut app, KeyCode::Enter).await;
        assert!(!app.settings_form.editing);
        assert_eq!(app.settings_form.distance, "3");

        handle_settings_input(&mut app, KeyCode::Down).await;
        handle_settings_input(&mut app, KeyCode::Left).await;
        assert_eq!(app.settings_form.price(), "2,2");

        handle_settings_input(&mut app, KeyCode::Char('s')).await;
        assert_eq!(app.screen, AppScreen::Main);
        let stored = app.settings_store.load().await;
        assert!((stored.distance - 3.0).abs() < f64::EPSILON);
        assert_eq!(stored.price, "2,2");

        finish_fetch(&mut app).await?;
        assert_eq!(app.wheel.len(), 3);
        Ok(())
    }
}
