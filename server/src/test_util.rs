//! test utilities. Provides mock clients and fixture builders.

use crate::clients::directions::{DirectionsApi, DriveRoute, RouteError};
use crate::clients::places::{PlaceSearchApi, SearchError, Venue, VenueCategory};
use crate::clients::session::{PublishError, ResultPublisher};
use crate::clients::Clients;
use crate::engine::evaluation::EvaluatedVenue;
use crate::engine::geo::GeoPoint;
use crate::engine::MeetingResolution;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Writes a debug! message to the test logger
#[macro_export]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test", $($arg)+);
    };
}

/// Writes an info! message to the test logger
#[macro_export]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test", $($arg)+);
    };
}

/// Writes an warn! message to the test logger
#[macro_export]
macro_rules! ut_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "test", $($arg)+);
    };
}

/// Writes an error! message to the test logger
#[macro_export]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test", $($arg)+);
    };
}

/// scripted directions backend keyed by (origin, destination)
#[derive(Debug, Default)]
pub struct MockDirections {
    routes: HashMap<(GeoPoint, GeoPoint), DriveRoute>,
    failures: HashMap<(GeoPoint, GeoPoint), RouteError>,
    delays: HashMap<(GeoPoint, GeoPoint), u64>,
    fallback: Option<DriveRoute>,
}

impl MockDirections {
    /// script a route for one origin and destination pair
    pub fn with_route(
        mut self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        route: DriveRoute,
    ) -> Self {
        self.routes.insert((*origin, *destination), route);
        self
    }

    /// script a lookup failure for one origin and destination pair
    pub fn with_failure(
        mut self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        e: RouteError,
    ) -> Self {
        self.failures.insert((*origin, *destination), e);
        self
    }

    /// script a route for every pair without its own entry
    pub fn with_fallback(mut self, route: DriveRoute) -> Self {
        self.fallback = Some(route);
        self
    }

    /// delay one pair's answer by the given milliseconds
    pub fn with_delay(mut self, origin: &GeoPoint, destination: &GeoPoint, millis: u64) -> Self {
        self.delays.insert((*origin, *destination), millis);
        self
    }
}

#[async_trait]
impl DirectionsApi for MockDirections {
    async fn get_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<DriveRoute, RouteError> {
        let key = (*origin, *destination);
        if let Some(millis) = self.delays.get(&key) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        if let Some(e) = self.failures.get(&key) {
            return Err(*e);
        }

        if let Some(route) = self.routes.get(&key) {
            return Ok(route.clone());
        }

        match &self.fallback {
            Some(route) => Ok(route.clone()),
            None => Err(RouteError::NoRoute),
        }
    }
}

/// scripted venue search backend keyed by category
#[derive(Debug, Default)]
pub struct MockPlaces {
    venues: HashMap<VenueCategory, Vec<Venue>>,
    failures: HashSet<VenueCategory>,
    delays: HashMap<VenueCategory, u64>,
}

impl MockPlaces {
    /// script the venues one category search returns
    pub fn with_venues(mut self, category: VenueCategory, venues: Vec<Venue>) -> Self {
        self.venues.insert(category, venues);
        self
    }

    /// script a search failure for one category
    pub fn with_failure(mut self, category: VenueCategory) -> Self {
        self.failures.insert(category);
        self
    }

    /// delay one category's answer by the given milliseconds
    pub fn with_delay(mut self, category: VenueCategory, millis: u64) -> Self {
        self.delays.insert(category, millis);
        self
    }
}

#[async_trait]
impl PlaceSearchApi for MockPlaces {
    async fn search_category(
        &self,
        category: VenueCategory,
        _near: &GeoPoint,
        limit: u16,
    ) -> Result<Vec<Venue>, SearchError> {
        if let Some(millis) = self.delays.get(&category) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        if self.failures.contains(&category) {
            return Err(SearchError::Transport);
        }

        Ok(self
            .venues
            .get(&category)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit as usize)
            .collect())
    }
}

/// publisher that records every update instead of sending it
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, MeetingResolution)>>,
}

impl RecordingPublisher {
    /// everything published so far, in publish order
    pub async fn published(&self) -> Vec<(String, MeetingResolution)> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl ResultPublisher for RecordingPublisher {
    async fn publish(
        &self,
        session_id: &str,
        resolution: &MeetingResolution,
    ) -> Result<(), PublishError> {
        self.published
            .lock()
            .await
            .push((session_id.to_string(), resolution.clone()));
        Ok(())
    }
}

/// bundle mock backends into a [Clients] object
pub fn mock_clients(directions: MockDirections, places: MockPlaces) -> Clients {
    Clients {
        directions: Arc::new(directions),
        places: Arc::new(places),
        sessions: Arc::new(RecordingPublisher::default()),
    }
}

/// build a route with explicit geometry vertices
pub fn route_with_points(
    points: Vec<GeoPoint>,
    duration_seconds: f64,
    distance_meters: f64,
) -> DriveRoute {
    DriveRoute {
        points,
        duration_seconds,
        distance_meters,
    }
}

/// build a route carrying only travel costs, no geometry
pub fn cost_route(duration_seconds: f64, distance_meters: f64) -> DriveRoute {
    route_with_points(vec![], duration_seconds, distance_meters)
}

/// build a venue candidate at the given location
pub fn sample_venue(name: &str, category: VenueCategory, location: GeoPoint) -> Venue {
    Venue {
        id: Uuid::new_v4().to_string(),
        name: String::from(name),
        category,
        address: format!("{} Main St", rand::random::<u16>()),
        location,
    }
}

/// build an evaluated venue with the given drive times
pub fn evaluated_venue(name: &str, drive_time_a: i32, drive_time_b: i32) -> EvaluatedVenue {
    EvaluatedVenue {
        venue: sample_venue(name, VenueCategory::Cafe, GeoPoint::new(40.1, -75.1)),
        drive_time_a,
        drive_time_b,
        distance_a: 1.0,
        distance_b: 1.0,
        total_drive_time: drive_time_a + drive_time_b,
        time_difference: (drive_time_a - drive_time_b).abs(),
        distance_from_midpoint: 0.5,
        degraded: false,
    }
}
