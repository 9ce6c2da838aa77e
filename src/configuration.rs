use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    /// sqlx connection string, e.g. `sqlite:trivia.db`
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

/// Reads settings from defaults, an optional `configuration.{yaml,toml,json}` in
/// the working directory and `APP_*` environment variables, in that order.
///
/// Nested keys use a double underscore: `APP_DATABASE__URL`, `APP_APPLICATION__PORT`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();
    build(Config::builder().add_source(File::with_name("configuration").required(false)))
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Settings, ConfigError> {
    builder
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.max_connections", 5)?
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
