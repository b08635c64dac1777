use clap::Parser;
use color_eyre::Result;
use lunch_wheel::app::App;
use lunch_wheel::cli::CliArgs;
use lunch_wheel::config::{init_app_config, AppConfig};
use lunch_wheel::{db, event, terminal};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let interactive = !args.headless && !args.history && is_terminal();
    init_tracing(&config, args.debug, interactive)?;

    let pool = db::create_database_pool(&config.database_url).await?;
    let mut app = App::new(&config, pool);

    if args.history {
        return event::run_history(&app, args.json).await;
    }

    // Not attached to a terminal: print the wheel instead of drawing it
    if !interactive {
        return event::run_headless(&mut app, args.json).await;
    }

    app.initialize().await;

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

/// The TUI owns stdout, so interactive runs log to a file; headless runs log to stderr.
fn init_tracing(config: &AppConfig, debug: bool, interactive: bool) -> Result<()> {
    let default_level = if debug { "lunch_wheel=debug" } else { "lunch_wheel=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if interactive {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
