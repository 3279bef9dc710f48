//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `GYMDESK__`-prefixed environment
//! variables (e.g. `GYMDESK__SERVER__PORT=8080`).
//!
//! See `settings.toml` for an example.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level applied to every crate of the workspace.
    pub level: String,
    /// Wipe the database and insert the demo admin/member at startup.
    pub seed_demo: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub session_ttl_hours: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.seed_demo", false)?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .set_default("server.session_ttl_hours", 24)?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("GYMDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if settings.server.session_ttl_hours <= 0 {
            return Err(ConfigError::Message(
                "server.session_ttl_hours must be > 0".to_string(),
            ));
        }
        Ok(settings)
    }
}
