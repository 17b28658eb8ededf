use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Layered lookup: built-in defaults, then `configuration.toml` (or the file
/// given on the command line), then `TRIVIA__`-prefixed environment variables.
pub fn get_configuration(file: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?;

    builder = match file {
        Some(path) => builder.add_source(File::from(PathBuf::from(path))),
        None => builder.add_source(File::with_name("configuration").required(false)),
    };

    builder
        .add_source(Environment::with_prefix("TRIVIA").separator("__"))
        .build()?
        .try_deserialize()
}
