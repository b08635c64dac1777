use crate::app::state::{SettingsField, SettingsForm};
use crate::app::App;
use crate::domain::PriceRange;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_settings(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    let form = &app.settings_form;
    let cursor = if form.editing && (app.animation_counter * 2.0).sin() > 0.0 {
        "█"
    } else {
        ""
    };

    let mut lines = vec![TextLine::from("")];
    lines.push(field_line(
        form,
        SettingsField::Distance,
        "Distance (miles)",
        format!("{}{}", form.distance, field_cursor(form, SettingsField::Distance, cursor)),
    ));
    lines.push(TextLine::from(""));
    lines.push(field_line(
        form,
        SettingsField::Price,
        "Price range",
        format!("◀ {} ▶", price_label(form.price())),
    ));
    lines.push(TextLine::from(""));
    lines.push(field_line(
        form,
        SettingsField::Dietary,
        "Dietary",
        format!("{}{}", form.dietary, field_cursor(form, SettingsField::Dietary, cursor)),
    ));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Dietary preferences are saved for later; searches do not use them yet.",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Settings ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        layout[0],
    );

    let status = Paragraph::new(Span::styled(
        app.status_message.as_str(),
        if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        },
    ))
    .block(
        Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(status, layout[1]);

    let hint = if form.editing {
        "Type to edit  Enter/Esc done"
    } else {
        "Up/Down select  Enter edit  Left/Right price  s save  d defaults  Esc back"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        layout[2],
    );
}

fn field_line(
    form: &SettingsForm,
    field: SettingsField,
    label: &str,
    value: String,
) -> TextLine<'static> {
    let focused = form.field == field;
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused && form.editing {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
    } else if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    TextLine::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{label:<18}"), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

fn field_cursor<'a>(form: &SettingsForm, field: SettingsField, cursor: &'a str) -> &'a str {
    if form.field == field {
        cursor
    } else {
        ""
    }
}

fn price_label(stored: &str) -> String {
    let range = PriceRange::from_stored(stored);
    if range.min == range.max {
        "$".repeat(usize::from(range.min))
    } else {
        format!(
            "{} - {}",
            "$".repeat(usize::from(range.min)),
            "$".repeat(usize::from(range.max))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_labels() {
        assert_eq!(price_label("2,3"), "$$ - $$$");
        assert_eq!(price_label("4,4"), "$$$$");
    }
}
