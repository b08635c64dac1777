use crate::app::App;
use crate::ui::widgets::wheel::{render_wheel, segment_color};
use crate::wheel::segment_at;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(8),    // Wheel and side panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Lunch ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Wheel",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  spin to decide where to eat",
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(title, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let wheel_block = Block::default()
        .title(" Wheel ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let wheel_inner = wheel_block.inner(columns[0]);
    f.render_widget(wheel_block, columns[0]);

    if app.loading {
        render_loading(app, f, wheel_inner);
    } else if app.wheel.is_empty() {
        let paragraph = Paragraph::new("No restaurants on the wheel. Press r to search again.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, wheel_inner);
    } else {
        render_wheel(
            f,
            wheel_inner,
            &app.wheel,
            app.current_rotation(),
            landed_index(app),
        );
    }

    render_side_panel(app, f, columns[1]);
}

fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let width = 34.min(rows[1].width);
    let centered = Rect {
        x: rows[1].x + (rows[1].width - width) / 2,
        width,
        ..rows[1]
    };

    let throbber = Throbber::default()
        .label("Finding restaurants near you...")
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    let mut state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, centered, &mut state);
}

fn landed_index(app: &App) -> Option<usize> {
    if app.is_spinning() {
        return None;
    }

    let landed = app.landed.as_ref()?;
    app.wheel.iter().position(|option| option == landed)
}

fn render_side_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(area);

    let pointer_index = (!app.wheel.is_empty())
        .then(|| segment_at(app.current_rotation(), app.wheel.len()));

    let mut lines: Vec<TextLine<'_>> = app
        .wheel
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if Some(i) == pointer_index { "▶ " } else { "  " };
            let mut style = Style::default().fg(segment_color(i));
            if Some(i) == landed_index(app) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            TextLine::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(option.name.as_str(), style),
            ])
        })
        .collect();

    if let Some(landed) = app.landed.as_ref().filter(|_| !app.is_spinning()) {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("Winner: ", Style::default().fg(Color::Gray)),
            Span::styled(
                landed.name.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let options = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Options ")
                .title_style(Style::default().fg(Color::Magenta))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(options, split[0]);

    let range = app.settings.price_range();
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::Yellow);
    let settings = Paragraph::new(Text::from(vec![
        TextLine::from(vec![
            Span::styled("Distance: ", label_style),
            Span::styled(format!("{} mi", app.settings.distance), value_style),
        ]),
        TextLine::from(vec![
            Span::styled("Price:    ", label_style),
            Span::styled(
                format!(
                    "{} - {}",
                    "$".repeat(usize::from(range.min)),
                    "$".repeat(usize::from(range.max))
                ),
                value_style,
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Dietary:  ", label_style),
            Span::styled(
                if app.settings.dietary.is_empty() {
                    "none".to_string()
                } else {
                    app.settings.dietary.clone()
                },
                value_style,
            ),
        ]),
    ]))
    .block(
        Block::default()
            .title(" Settings ")
            .title_style(Style::default().fg(Color::Blue))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(settings, split[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.is_spinning() {
        Text::from(Span::styled("Spinning...", Style::default().fg(Color::Cyan)))
    } else if app.status_message.is_empty() {
        Text::from(Span::styled(
            if app.loading { "Loading" } else { "Ready" },
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    for (key, label) in [
        ("Space", "spin"),
        ("o", "settings"),
        ("h", "history"),
        ("r", "refresh"),
        ("l", "open winner"),
        ("?", "help"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {label}  "), text_style));
    }

    let shortcuts = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}
