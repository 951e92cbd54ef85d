//! Driving directions client.
//!
//! Wraps the directions REST endpoint and decodes its GeoJSON route
//! geometry into engine types.

use crate::engine::geo::GeoPoint;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// Routing profile requested from the directions endpoint
const DRIVING_PROFILE: &str = "driving";

/// Errors that can arise from a route lookup
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RouteError {
    /// Could not contact the directions service
    Transport,
    /// The response body could not be decoded
    InvalidResponse,
    /// The service answered but found no drivable route
    NoRoute,
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RouteError::Transport => write!(f, "Could not contact directions service"),
            RouteError::InvalidResponse => write!(f, "Invalid directions response"),
            RouteError::NoRoute => write!(f, "No route found"),
        }
    }
}

/// A drivable route between two points
#[derive(Debug, Clone, PartialEq)]
pub struct DriveRoute {
    /// Route geometry as ordered vertices from origin to destination
    pub points: Vec<GeoPoint>,

    /// Total driving time in seconds
    pub duration_seconds: f64,

    /// Total driving distance in meters
    pub distance_meters: f64,
}

/// Interface for any directions backend
#[async_trait]
pub trait DirectionsApi: Send + Sync + Debug {
    /// Get the best driving route from `origin` to `destination`
    async fn get_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<DriveRoute, RouteError>;
}

/// Top level directions response payload
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RouteLeg>,
    #[serde(default)]
    code: String,
}

/// One route alternative in a directions response
#[derive(Debug, Deserialize)]
struct RouteLeg {
    geometry: Option<RouteGeometry>,
    duration: f64,
    distance: f64,
}

/// GeoJSON LineString geometry
#[derive(Debug, Deserialize)]
struct RouteGeometry {
    /// \[longitude, latitude\] pairs
    coordinates: Vec<[f64; 2]>,
}

/// [DirectionsApi] implementation backed by a Mapbox style REST endpoint
pub struct HttpDirectionsClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl Debug for HttpDirectionsClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HttpDirectionsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpDirectionsClient {
    /// Create a new client against the given base URL
    pub fn new(client: reqwest::Client, base_url: &str, access_token: &str) -> Self {
        HttpDirectionsClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn build_route_url(&self, origin: &GeoPoint, destination: &GeoPoint) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.base_url,
            DRIVING_PROFILE,
            origin.longitude.into_inner(),
            origin.latitude.into_inner(),
            destination.longitude.into_inner(),
            destination.latitude.into_inner()
        )
    }

    fn convert_response(response: DirectionsResponse) -> Result<DriveRoute, RouteError> {
        let code = response.code;
        let Some(route) = response.routes.into_iter().next() else {
            client_info!("(convert_response) no routes in response, code [{}].", code);
            return Err(RouteError::NoRoute);
        };

        let points = route
            .geometry
            .map(|geometry| {
                geometry
                    .coordinates
                    .iter()
                    .map(|pair| GeoPoint::new(pair[1], pair[0]))
                    .collect()
            })
            .unwrap_or_default();

        Ok(DriveRoute {
            points,
            duration_seconds: route.duration,
            distance_meters: route.distance,
        })
    }
}

#[async_trait]
impl DirectionsApi for HttpDirectionsClient {
    async fn get_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<DriveRoute, RouteError> {
        let url = self.build_route_url(origin, destination);
        client_debug!("(get_route) requesting route [{} -> {}].", origin, destination);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("geometries", "geojson"),
                ("overview", "full"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                client_warn!(
                    "(get_route) directions request failed: {}",
                    e.without_url()
                );
                RouteError::Transport
            })?;

        let payload: DirectionsResponse = response.json().await.map_err(|e| {
            client_warn!(
                "(get_route) could not decode directions response: {}",
                e.without_url()
            );
            RouteError::InvalidResponse
        })?;

        Self::convert_response(payload)
    }
}
