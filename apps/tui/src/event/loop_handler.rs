use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::app::{handle_input, App};
use crate::domain::{HistoryEntry, Settings, WheelOption};
use crate::ui;
use crate::wheel;

/// Fetch once and print the wheel options (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.settings = app.settings_store.load().await;

    let candidates = app.fetcher.fetch_restaurants().await.map_err(|e| {
        tracing::error!("Headless fetch failed: {e}");
        eyre!("{e}")
    })?;
    let options = wheel::select(&candidates, &mut rand::thread_rng());

    let report = HeadlessWheel {
        settings: &app.settings,
        found: candidates.len(),
        options: &options,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_wheel(&report);
    }

    Ok(())
}

fn render_headless_wheel(report: &HeadlessWheel<'_>) {
    let range = report.settings.price_range();

    println!("\nLunch Wheel");
    println!("===========");
    println!(
        "Within {} mi, price {}-{}: {} restaurants found",
        report.settings.distance, range.min, range.max, report.found
    );

    println!("\nOn the wheel:");
    for (i, option) in report.options.iter().enumerate() {
        println!("{:>2}. {} | {}", i + 1, option.name, option.map_link);
    }
}

/// Print the stored pick history (no UI)
pub async fn run_history(app: &App, json: bool) -> Result<()> {
    let history = app.history_store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    render_history(&history);
    Ok(())
}

fn render_history(history: &[HistoryEntry]) {
    println!("\nRestaurant History");
    println!("==================");

    if history.is_empty() {
        println!("No restaurant history yet. Spin the wheel to get started!");
        return;
    }

    for entry in history {
        println!(
            "- {} | {} at {} | {}",
            entry.name, entry.date, entry.time, entry.map_link
        );
    }
}

#[derive(serde::Serialize)]
struct HeadlessWheel<'a> {
    settings: &'a Settings,
    found: usize,
    options: &'a [WheelOption],
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Advance animations, then pick up background results
        app.update();
        app.poll_fetch().await;
        app.record_pick().await;

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        tracing::warn!("Redraw after resize failed: {e}");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to read terminal event: {e}"),
            }
        }
    }

    if let Some(task) = app.fetch_task.take() {
        task.abort();
    }

    Ok(())
}
