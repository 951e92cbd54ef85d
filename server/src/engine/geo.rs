//! Geographic primitives for the resolution engine.
//!
//! Distances between coordinates use the Haversine formula, see
//! [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for more.
//!
//! **Distance is returned in statute miles**.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Mean Earth radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A geographic coordinate in decimal degrees
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GeoPoint {
    /// latitude in degrees, positive north
    #[serde(rename = "lat")]
    pub latitude: OrderedFloat<f64>,

    /// longitude in degrees, positive east
    #[serde(rename = "lng")]
    pub longitude: OrderedFloat<f64>,
}

impl GeoPoint {
    /// Create a new point from plain degree values
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{},{}",
            self.latitude.into_inner(),
            self.longitude.into_inner()
        )
    }
}

/// Error type for parsing a point from a "lat,lng" string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoPointParseError {
    /// The string was not two comma separated numbers
    Malformed,
    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    OutOfRange,
}

impl Display for GeoPointParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GeoPointParseError::Malformed => {
                write!(f, "Expected a \"lat,lng\" pair of decimal degrees")
            }
            GeoPointParseError::OutOfRange => write!(f, "Coordinate out of range"),
        }
    }
}

impl std::error::Error for GeoPointParseError {}

impl FromStr for GeoPoint {
    type Err = GeoPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((latitude, longitude)) = s.split_once(',') else {
            return Err(GeoPointParseError::Malformed);
        };

        let Ok(latitude) = latitude.trim().parse::<f64>() else {
            return Err(GeoPointParseError::Malformed);
        };

        let Ok(longitude) = longitude.trim().parse::<f64>() else {
            return Err(GeoPointParseError::Malformed);
        };

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointParseError::OutOfRange);
        }

        Ok(GeoPoint::new(latitude, longitude))
    }
}

/// Calculate the great-circle distance between two points in miles.
///
/// # Notes
/// The formula does ***not*** take altitude into account. Float 64 values
/// keep the error margin well below the one tenth of a mile the engine
/// rounds results to.
pub fn haversine_miles(start: &GeoPoint, end: &GeoPoint) -> f64 {
    let d_lat: f64 = (end.latitude.into_inner() - start.latitude.into_inner()).to_radians();
    let d_lon: f64 = (end.longitude.into_inner() - start.longitude.into_inner()).to_radians();
    let lat1: f64 = (start.latitude.into_inner()).to_radians();
    let lat2: f64 = (end.latitude.into_inner()).to_radians();

    let a: f64 = ((d_lat / 2.0).sin()) * ((d_lat / 2.0).sin())
        + ((d_lon / 2.0).sin()) * ((d_lon / 2.0).sin()) * (lat1.cos()) * (lat2.cos());
    let c: f64 = 2.0 * ((a.sqrt()).atan2((1.0 - a).sqrt()));

    EARTH_RADIUS_MILES * c
}

/// Round a value to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
