//! Provides the meeting point resolution engine.
//!
//! A resolution runs four stages in order: midpoint resolution along
//! the driving route, venue discovery around the midpoint, pairwise
//! travel cost evaluation, and fairness ranking.

#[macro_use]
pub mod macros;

pub mod discovery;
pub mod evaluation;
pub mod geo;
pub mod midpoint;
pub mod ranking;

use crate::clients::Clients;
use discovery::{discover_venues, DiscoveryPlan};
use evaluation::{evaluate_venues, EvaluatedVenue};
use geo::GeoPoint;
use midpoint::resolve_midpoint;
use ranking::rank_venues;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A raw resolution request with two travel origins
///
/// Carried over the wire with camelCase keys. Sanitized into a
/// [MeetingQuery] before any external call is made.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    /// First participant origin
    pub origin_a: GeoPoint,

    /// Second participant origin
    pub origin_b: GeoPoint,
}

/// A sanitized resolution query
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeetingQuery {
    /// First participant origin
    pub origin_a: GeoPoint,

    /// Second participant origin
    pub origin_b: GeoPoint,
}

/// Errors generated by sanitizing a [MeetingRequest]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeetingQueryError {
    /// An origin latitude is outside [-90, 90]
    InvalidLatitude,
    /// An origin longitude is outside [-180, 180]
    InvalidLongitude,
}

impl Display for MeetingQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MeetingQueryError::InvalidLatitude => write!(f, "Invalid latitude"),
            MeetingQueryError::InvalidLongitude => write!(f, "Invalid longitude"),
        }
    }
}

impl TryFrom<MeetingRequest> for MeetingQuery {
    type Error = MeetingQueryError;

    fn try_from(request: MeetingRequest) -> Result<Self, Self::Error> {
        const ERROR_PREFIX: &str = "(try_from)";

        for origin in [&request.origin_a, &request.origin_b] {
            if !(-90.0..=90.0).contains(&origin.latitude.into_inner()) {
                engine_error!("{} invalid latitude [{}].", ERROR_PREFIX, origin.latitude);
                return Err(MeetingQueryError::InvalidLatitude);
            }

            if !(-180.0..=180.0).contains(&origin.longitude.into_inner()) {
                engine_error!("{} invalid longitude [{}].", ERROR_PREFIX, origin.longitude);
                return Err(MeetingQueryError::InvalidLongitude);
            }
        }

        Ok(MeetingQuery {
            origin_a: request.origin_a,
            origin_b: request.origin_b,
        })
    }
}

/// Errors a resolution can end with
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EngineError {
    /// No drivable route exists between the two origins
    RouteUnavailable,
    /// Something went wrong during the resolution
    Internal,
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EngineError::RouteUnavailable => write!(f, "Could not find route"),
            EngineError::Internal => write!(f, "Internal error"),
        }
    }
}

/// A finished meeting resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingResolution {
    /// The route midpoint venues were searched around
    pub midpoint: GeoPoint,

    /// Ranked venues, fairest first
    pub venues: Vec<EvaluatedVenue>,
}

/// Resolve a fair meeting point between the query's two origins.
///
/// # Errors
///
/// Returns [EngineError::RouteUnavailable] when the origins cannot be
/// connected by road. Venue search and travel lookup failures degrade
/// the result instead of failing it.
pub async fn resolve_meeting(
    query: &MeetingQuery,
    plan: &DiscoveryPlan,
    clients: &Clients,
) -> Result<MeetingResolution, EngineError> {
    //
    // Find the midpoint of the driving route between the origins
    //
    let midpoint = resolve_midpoint(&query.origin_a, &query.origin_b, clients).await?;

    //
    // Gather venue candidates around the midpoint
    //
    let candidates = discover_venues(&midpoint, plan, clients).await;

    //
    // Measure travel costs from both origins to every candidate
    //
    let evaluated = evaluate_venues(
        candidates,
        &query.origin_a,
        &query.origin_b,
        &midpoint,
        clients,
    )
    .await;

    //
    // Rank by fairness and keep the best
    //
    let venues = rank_venues(evaluated);

    engine_info!(
        "(resolve_meeting) resolved midpoint [{}] with [{}] ranked venues.",
        midpoint,
        venues.len()
    );

    Ok(MeetingResolution { midpoint, venues })
}
