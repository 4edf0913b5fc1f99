// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration.
///
/// Layered from `config/default`, an optional per-environment file selected
/// by `APP_ENVIRONMENT`, and `CRATEDIGGER__`-prefixed environment
/// variables, in that order.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub sources: SourceSettings,
    pub aggregation: AggregationSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// Path of the persisted result snapshot.
    pub snapshot_path: String,
}

/// Upstream marketplace credentials. All of them are optional: a missing
/// credential is a supported configuration state that degrades the
/// corresponding source to search links instead of failing the run.
#[derive(Debug, Deserialize)]
pub struct SourceSettings {
    pub discogs_token: Option<String>,
    pub ebay_client_id: Option<String>,
    pub ebay_client_secret: Option<String>,
    /// "production" or "sandbox".
    pub ebay_environment: String,
}

#[derive(Debug, Deserialize)]
pub struct AggregationSettings {
    /// Pause between artists in a batch, in milliseconds.
    pub artist_delay_ms: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("storage.snapshot_path", "./data/results.json")?
            .set_default("sources.ebay_environment", "production")?
            .set_default(
                "aggregation.artist_delay_ms",
                crate::infrastructure::search::aggregator::DEFAULT_ARTIST_DELAY_MS,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRATEDIGGER").separator("__"));

        builder.build()?.try_deserialize()
    }
}
