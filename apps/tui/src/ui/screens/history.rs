use crate::app::App;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_history(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area().inner(Margin::new(2, 1)));
    let area = layout[0];

    let block = Block::default()
        .title(" Restaurant History ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.history.is_empty() {
        let paragraph = Paragraph::new(vec![
            TextLine::from(""),
            TextLine::from("No restaurant history yet. Spin the wheel to get started!"),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
    } else {
        let header = Row::new(vec![
            Cell::from("#"),
            Cell::from("Restaurant"),
            Cell::from("When"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let total_rows = app.history.len();
        let max_visible_rows = area.height.saturating_sub(3) as usize;
        let scroll_offset = scroll_offset(total_rows, max_visible_rows, app.selected_history_index);

        let rows = app
            .history
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(max_visible_rows)
            .map(|(i, entry)| {
                let style = if i == app.selected_history_index {
                    Style::default()
                        .bg(Color::Rgb(0, 0, 238))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(entry.name.clone()),
                    Cell::from(format!("{} at {}", entry.date, entry.time)),
                ])
                .style(style)
            });

        let widths = [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(24),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        f.render_widget(table, area);
    }

    let link = app
        .history
        .get(app.selected_history_index)
        .map_or("", |entry| entry.map_link.as_str());
    let detail = Paragraph::new(Span::styled(link, Style::default().fg(Color::Cyan))).block(
        Block::default()
            .title(if app.status_message.is_empty() {
                " Map link ".to_string()
            } else {
                format!(" {} ", app.status_message)
            })
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(detail, layout[1]);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Up/Down select  Enter open map  c clear  Esc back  q quit",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        layout[2],
    );
}
