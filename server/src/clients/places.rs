//! Venue search client.
//!
//! Wraps the category search REST endpoint and decodes its feature
//! collection into venue candidates.

use crate::engine::geo::GeoPoint;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Placeholder shown when a venue has no usable address
const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// Venue categories the engine searches around a midpoint
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueCategory {
    Cafe,
    Restaurant,
    Bar,
    GasStation,
}

impl VenueCategory {
    /// The category tag used by the search endpoint
    pub fn tag(&self) -> &'static str {
        match self {
            VenueCategory::Cafe => "cafe",
            VenueCategory::Restaurant => "restaurant",
            VenueCategory::Bar => "bar",
            VenueCategory::GasStation => "gas_station",
        }
    }
}

impl Display for VenueCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.tag())
    }
}

/// Error type for parsing a category from its tag
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Unknown venue category: {}", self.0)
    }
}

impl FromStr for VenueCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cafe" => Ok(VenueCategory::Cafe),
            "restaurant" => Ok(VenueCategory::Restaurant),
            "bar" => Ok(VenueCategory::Bar),
            "gas_station" => Ok(VenueCategory::GasStation),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A venue candidate returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Stable identifier from the search backend
    pub id: String,

    /// Display name
    pub name: String,

    /// Category the venue was found under
    pub category: VenueCategory,

    /// Human readable address, falls back to [ADDRESS_NOT_AVAILABLE]
    pub address: String,

    /// Venue coordinates
    pub location: GeoPoint,
}

/// Errors that can arise from a category search
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SearchError {
    /// Could not contact the search service
    Transport,
    /// The response body could not be decoded
    InvalidResponse,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SearchError::Transport => write!(f, "Could not contact search service"),
            SearchError::InvalidResponse => write!(f, "Invalid search response"),
        }
    }
}

/// Interface for any venue search backend
#[async_trait]
pub trait PlaceSearchApi: Send + Sync + Debug {
    /// Search for venues of one category near a point
    async fn search_category(
        &self,
        category: VenueCategory,
        near: &GeoPoint,
        limit: u16,
    ) -> Result<Vec<Venue>, SearchError>;
}

/// Top level category search response payload
#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(default)]
    features: Vec<SearchFeature>,
}

/// One venue feature in a search response
#[derive(Debug, Deserialize)]
struct SearchFeature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    mapbox_id: String,
    name: String,
    full_address: Option<String>,
    place_formatted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// \[longitude, latitude\] pair
    coordinates: [f64; 2],
}

impl SearchFeature {
    fn into_venue(self, category: VenueCategory) -> Venue {
        let FeatureProperties {
            mapbox_id,
            name,
            full_address,
            place_formatted,
        } = self.properties;

        // Empty address strings count as missing
        let address = full_address
            .filter(|address| !address.is_empty())
            .or_else(|| place_formatted.filter(|address| !address.is_empty()))
            .unwrap_or_else(|| String::from(ADDRESS_NOT_AVAILABLE));

        Venue {
            id: mapbox_id,
            name,
            category,
            address,
            location: GeoPoint::new(self.geometry.coordinates[1], self.geometry.coordinates[0]),
        }
    }
}

/// [PlaceSearchApi] implementation backed by a Mapbox style REST endpoint
pub struct HttpPlacesClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl Debug for HttpPlacesClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HttpPlacesClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpPlacesClient {
    /// Create a new client against the given base URL
    pub fn new(client: reqwest::Client, base_url: &str, access_token: &str) -> Self {
        HttpPlacesClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn build_category_url(&self, category: VenueCategory) -> String {
        format!(
            "{}/search/searchbox/v1/category/{}",
            self.base_url,
            category.tag()
        )
    }
}

#[async_trait]
impl PlaceSearchApi for HttpPlacesClient {
    async fn search_category(
        &self,
        category: VenueCategory,
        near: &GeoPoint,
        limit: u16,
    ) -> Result<Vec<Venue>, SearchError> {
        let url = self.build_category_url(category);
        let proximity = format!(
            "{},{}",
            near.longitude.into_inner(),
            near.latitude.into_inner()
        );
        client_debug!("(search_category) searching [{}] near [{}].", category, near);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("proximity", proximity.as_str()),
                ("limit", limit.to_string().as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                client_warn!(
                    "(search_category) [{}] search request failed: {}",
                    category,
                    e.without_url()
                );
                SearchError::Transport
            })?;

        let payload: CategoryResponse = response.json().await.map_err(|e| {
            client_warn!(
                "(search_category) could not decode [{}] search response: {}",
                category,
                e.without_url()
            );
            SearchError::InvalidResponse
        })?;

        Ok(payload
            .features
            .into_iter()
            .map(|feature| feature.into_venue(category))
            .collect())
    }
}
