//! Pairwise travel cost evaluation for candidate venues.
//!
//! Every candidate gets a driving time and distance from each origin.
//! Candidates are evaluated concurrently and a failed lookup degrades
//! the venue to zero cost instead of failing the resolution.

use crate::clients::directions::{DirectionsApi, DriveRoute, RouteError};
use crate::clients::places::Venue;
use crate::clients::Clients;
use crate::engine::geo::{haversine_miles, round_tenth, GeoPoint};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Meters to statute miles conversion factor
const METERS_TO_MILES: f64 = 0.000621371;

/// Travel cost from one origin to a venue
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TravelCost {
    /// Cost measured from a route lookup
    Measured {
        /// Driving time rounded to whole minutes
        minutes: i32,
        /// Driving distance in miles, one decimal
        miles: f64,
    },
    /// No cost available, counts as zero
    Unavailable,
}

impl TravelCost {
    /// Convert a route lookup result into a travel cost
    pub fn from_lookup(result: Result<DriveRoute, RouteError>) -> Self {
        match result {
            Ok(route) => TravelCost::Measured {
                minutes: (route.duration_seconds / 60.0).round() as i32,
                miles: round_tenth(route.distance_meters * METERS_TO_MILES),
            },
            Err(_) => TravelCost::Unavailable,
        }
    }

    /// Driving minutes, zero when unavailable
    pub fn minutes(&self) -> i32 {
        match self {
            TravelCost::Measured { minutes, .. } => *minutes,
            TravelCost::Unavailable => 0,
        }
    }

    /// Driving miles, zero when unavailable
    pub fn miles(&self) -> f64 {
        match self {
            TravelCost::Measured { miles, .. } => *miles,
            TravelCost::Unavailable => 0.0,
        }
    }

    /// True when the lookup behind this cost failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TravelCost::Unavailable)
    }
}

/// A venue candidate with its travel costs from both origins
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedVenue {
    /// The venue under evaluation
    #[serde(flatten)]
    pub venue: Venue,

    /// Driving minutes from origin A
    pub drive_time_a: i32,

    /// Driving minutes from origin B
    pub drive_time_b: i32,

    /// Driving miles from origin A, one decimal
    pub distance_a: f64,

    /// Driving miles from origin B, one decimal
    pub distance_b: f64,

    /// Both driving times added, in minutes
    pub total_drive_time: i32,

    /// Absolute difference of the two driving times, in minutes
    pub time_difference: i32,

    /// Great-circle miles from the midpoint, one decimal
    pub distance_from_midpoint: f64,

    /// True when at least one travel lookup failed and was zeroed
    pub degraded: bool,
}

impl EvaluatedVenue {
    /// Combine a venue with its two origin travel costs
    pub fn new(
        venue: Venue,
        midpoint: &GeoPoint,
        cost_a: TravelCost,
        cost_b: TravelCost,
    ) -> Self {
        let distance_from_midpoint = round_tenth(haversine_miles(midpoint, &venue.location));
        let drive_time_a = cost_a.minutes();
        let drive_time_b = cost_b.minutes();

        EvaluatedVenue {
            venue,
            drive_time_a,
            drive_time_b,
            distance_a: cost_a.miles(),
            distance_b: cost_b.miles(),
            total_drive_time: drive_time_a + drive_time_b,
            time_difference: (drive_time_a - drive_time_b).abs(),
            distance_from_midpoint,
            degraded: cost_a.is_unavailable() || cost_b.is_unavailable(),
        }
    }
}

/// Evaluate one candidate against both origins
async fn evaluate_venue(
    venue: Venue,
    origin_a: &GeoPoint,
    origin_b: &GeoPoint,
    midpoint: &GeoPoint,
    directions: Arc<dyn DirectionsApi>,
) -> EvaluatedVenue {
    let (lookup_a, lookup_b) = tokio::join!(
        directions.get_route(origin_a, &venue.location),
        directions.get_route(origin_b, &venue.location)
    );

    let cost_a = TravelCost::from_lookup(lookup_a);
    let cost_b = TravelCost::from_lookup(lookup_b);
    if cost_a.is_unavailable() || cost_b.is_unavailable() {
        engine_warn!(
            "(evaluate_venue) travel lookup failed for venue [{}], zeroing cost.",
            venue.id
        );
    }

    EvaluatedVenue::new(venue, midpoint, cost_a, cost_b)
}

/// Evaluate every candidate concurrently.
///
/// Results keep the candidate input order regardless of which
/// evaluation finishes first.
pub async fn evaluate_venues(
    candidates: Vec<Venue>,
    origin_a: &GeoPoint,
    origin_b: &GeoPoint,
    midpoint: &GeoPoint,
    clients: &Clients,
) -> Vec<EvaluatedVenue> {
    let count = candidates.len();
    let mut set = JoinSet::new();
    for (index, venue) in candidates.into_iter().enumerate() {
        let directions = clients.directions.clone();
        let origin_a = *origin_a;
        let origin_b = *origin_b;
        let midpoint = *midpoint;
        set.spawn(async move {
            (
                index,
                evaluate_venue(venue, &origin_a, &origin_b, &midpoint, directions).await,
            )
        });
    }

    let mut slots: Vec<Option<EvaluatedVenue>> = vec![None; count];
    while let Some(joined) = set.join_next().await {
        let Ok((index, evaluated)) = joined else {
            engine_warn!("(evaluate_venues) evaluation task failed to join.");
            continue;
        };

        slots[index] = Some(evaluated);
    }

    let evaluated: Vec<EvaluatedVenue> = slots.into_iter().flatten().collect();
    engine_info!("(evaluate_venues) evaluated [{}] venues.", evaluated.len());

    evaluated
}
