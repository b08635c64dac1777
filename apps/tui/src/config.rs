use crate::domain::Coordinates;
use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default pause between data arriving and the wheel being revealed.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_key: String,
    pub location: Option<Coordinates>,
    pub reveal_delay: Duration,
    pub log_file: PathBuf,
    pub open_links: bool,
}

/// Initializes the application configuration from `.env` and the process environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "lunch_wheel.db".to_string());
    let database_path = base_dir.join(&db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    Ok(AppConfig {
        database_url: sqlite_url(path_str, database_path.is_absolute()),
        api_key: env::var("PLACES_API_KEY").unwrap_or_default(),
        location: get_fixed_location()?,
        reveal_delay: get_reveal_delay(),
        log_file: env::var("LOG_FILE")
            .map_or_else(|_| PathBuf::from("lunch_wheel.log"), PathBuf::from),
        open_links: env::var("LUNCH_WHEEL_NO_BROWSER").is_err(),
    })
}

/// SQLx wants `sqlite:///abs/path` for absolute paths and `sqlite://rel/path` otherwise.
fn sqlite_url(path: &str, absolute: bool) -> String {
    let clean_path = path.trim_start_matches('/');
    if absolute {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    }
}

fn get_fixed_location() -> color_eyre::eyre::Result<Option<Coordinates>> {
    match env::var("LUNCH_WHEEL_LOCATION") {
        Ok(value) if !value.trim().is_empty() => Coordinates::parse(&value)
            .map(Some)
            .ok_or_else(|| eyre!("LUNCH_WHEEL_LOCATION must be \"lat,lng\", got \"{value}\"")),
        _ => Ok(None),
    }
}

fn get_reveal_delay() -> Duration {
    env::var("REVEAL_DELAY_MS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(DEFAULT_REVEAL_DELAY, Duration::from_millis)
}
