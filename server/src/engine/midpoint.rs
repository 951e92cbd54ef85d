//! Midpoint resolution along the route between the two origins.
//!
//! The midpoint is the middle vertex of the driving route geometry, not
//! the geometric midpoint of the two origins. This keeps the meeting
//! point on the actual driving corridor even when the route bends
//! around water or mountains.

use crate::clients::directions::{DriveRoute, RouteError};
use crate::clients::Clients;
use crate::engine::geo::GeoPoint;
use crate::engine::EngineError;

/// Pick the middle vertex of a route geometry.
///
/// For an even vertex count the later of the two middle vertices is
/// used. Returns [None] when the route carries no geometry.
pub fn route_midpoint(route: &DriveRoute) -> Option<GeoPoint> {
    route.points.get(route.points.len() / 2).copied()
}

/// Resolve the meeting midpoint for two origins.
///
/// # Errors
///
/// Returns [EngineError::RouteUnavailable] when no drivable route
/// exists between the origins. Any other lookup failure is an
/// [EngineError::Internal].
pub async fn resolve_midpoint(
    origin_a: &GeoPoint,
    origin_b: &GeoPoint,
    clients: &Clients,
) -> Result<GeoPoint, EngineError> {
    let route = match clients.directions.get_route(origin_a, origin_b).await {
        Ok(route) => route,
        Err(RouteError::NoRoute) => {
            engine_info!(
                "(resolve_midpoint) no route between [{}] and [{}].",
                origin_a,
                origin_b
            );
            return Err(EngineError::RouteUnavailable);
        }
        Err(e) => {
            engine_error!("(resolve_midpoint) route lookup failed: {}", e);
            return Err(EngineError::Internal);
        }
    };

    let Some(midpoint) = route_midpoint(&route) else {
        engine_error!("(resolve_midpoint) route has no geometry.");
        return Err(EngineError::Internal);
    };

    engine_debug!(
        "(resolve_midpoint) midpoint [{}] from [{}] route vertices.",
        midpoint,
        route.points.len()
    );

    Ok(midpoint)
}
