//! # Config
//!
//! Define and implement config options for module

use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// base URL of the directions service
    pub directions_base_url: String,

    /// base URL of the venue search service
    pub places_base_url: String,

    /// base URL of the session store results are published to
    pub session_store_base_url: String,

    /// access token passed to the map services
    pub map_api_token: String,

    /// timeout for external service calls, in seconds
    pub request_timeout_seconds: u64,

    /// comma separated venue categories to search
    pub search_categories: String,

    /// maximum results requested per category
    pub results_per_category: u16,

    /// path to log configuration YAML file
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            directions_base_url: String::from("https://api.mapbox.com"),
            places_base_url: String::from("https://api.mapbox.com"),
            session_store_base_url: String::from("http://localhost:9000"),
            map_api_token: String::from(""),
            request_timeout_seconds: 10,
            search_categories: String::from("cafe,restaurant,bar,gas_station"),
            results_per_category: 5,
            log_config: String::from("log4rs.yaml"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("directions_base_url", default_config.directions_base_url)?
            .set_default("places_base_url", default_config.places_base_url)?
            .set_default(
                "session_store_base_url",
                default_config.session_store_base_url,
            )?
            .set_default("map_api_token", default_config.map_api_token)?
            .set_default(
                "request_timeout_seconds",
                default_config.request_timeout_seconds,
            )?
            .set_default("search_categories", default_config.search_categories)?
            .set_default(
                "results_per_category",
                default_config.results_per_category,
            )?
            .set_default("log_config", default_config.log_config)?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
