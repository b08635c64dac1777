use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "lunch_wheel", version, about = "Spin a wheel of nearby restaurants")]
pub struct CliArgs {
    /// Fetch once, print the wheel options and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the pick history and exit
    #[arg(long)]
    pub history: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Search around fixed coordinates instead of looking up the IP location
    #[arg(long, value_name = "LAT,LNG")]
    pub location: Option<String>,

    /// Places API key
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Never open map links in the browser
    #[arg(long = "no-browser")]
    pub no_browser: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(location) = &self.location {
            std::env::set_var("LUNCH_WHEEL_LOCATION", location);
        }
        if let Some(key) = &self.api_key {
            std::env::set_var("PLACES_API_KEY", key);
        }
        if self.no_browser {
            std::env::set_var("LUNCH_WHEEL_NO_BROWSER", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::parse_from([
            "lunch_wheel",
            "--headless",
            "--json",
            "--location",
            "40.7,-74.0",
            "--no-browser",
        ]);

        assert!(args.headless);
        assert!(args.json);
        assert!(!args.history);
        assert_eq!(args.location.as_deref(), Some("40.7,-74.0"));
        assert!(args.no_browser);
    }

    #[test]
    fn help_lists_options() {
        let help = CliArgs::help_text();
        assert!(help.contains("--headless"));
        assert!(help.contains("--api-key"));
    }
}
