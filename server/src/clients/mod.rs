//! Provides REST client wrappers for the external services the engine
//! depends on.

#[macro_use]
pub mod macros;

pub mod directions;
pub mod places;
pub mod session;

use crate::config::Config;
use directions::{DirectionsApi, HttpDirectionsClient};
use places::{HttpPlacesClient, PlaceSearchApi};
use session::{HttpSessionClient, ResultPublisher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// User agent sent with every outbound request
const USER_AGENT: &str = concat!("svc-meetpoint/", env!("CARGO_PKG_VERSION"));

pub(crate) static CLIENTS: OnceCell<Clients> = OnceCell::const_new();

/// Returns CLIENTS, a shared [Clients] object with default values.
/// Uses base URL and timeout configurations from a Config object
/// generated from environment variables.
pub async fn get_clients() -> Clients {
    CLIENTS
        .get_or_init(|| async move {
            let config = Config::try_from_env().unwrap_or_default();
            Clients::default(config)
        })
        .await
        .clone()
}

/// Holds one client per external service
#[derive(Clone, Debug)]
pub struct Clients {
    /// Driving directions backend
    pub directions: Arc<dyn DirectionsApi>,
    /// Venue search backend
    pub places: Arc<dyn PlaceSearchApi>,
    /// Session store for published resolutions
    pub sessions: Arc<dyn ResultPublisher>,
}

impl Clients {
    /// Create new REST clients with the given [Config]
    pub fn default(config: Config) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_seconds);

        // All three services share one connection pool
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                client_warn!(
                    "(default) could not build HTTP client, using default: {}",
                    e
                );
                reqwest::Client::new()
            });

        client_info!(
            "(default) created REST clients with a [{}]s request timeout.",
            config.request_timeout_seconds
        );

        Clients {
            directions: Arc::new(HttpDirectionsClient::new(
                client.clone(),
                &config.directions_base_url,
                &config.map_api_token,
            )),
            places: Arc::new(HttpPlacesClient::new(
                client.clone(),
                &config.places_base_url,
                &config.map_api_token,
            )),
            sessions: Arc::new(HttpSessionClient::new(
                client,
                &config.session_store_base_url,
            )),
        }
    }
}
