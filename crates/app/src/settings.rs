//! Handles settings for the application.
//!
//! Configuration is read from `settings.toml` when present; environment
//! variables prefixed with `SPESE` override it (`SPESE__DATABASE__URL`,
//! `SPESE__SERVER__PORT`, `SPESE__SERVER__API_KEY`, ...). The database URL,
//! port and API secret are required, so a bare environment is a startup
//! error, not a runtime one.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        App {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("SPESE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
