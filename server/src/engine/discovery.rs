//! Venue discovery around the resolved midpoint.
//!
//! Each configured category is searched concurrently. A category whose
//! search fails is dropped from the candidate list without failing the
//! resolution.

use crate::clients::places::{Venue, VenueCategory};
use crate::clients::Clients;
use crate::config::Config;
use crate::engine::geo::GeoPoint;
use tokio::task::JoinSet;

/// Categories searched when the configured list yields none
const DEFAULT_CATEGORIES: [VenueCategory; 4] = [
    VenueCategory::Cafe,
    VenueCategory::Restaurant,
    VenueCategory::Bar,
    VenueCategory::GasStation,
];

/// What to search for around the midpoint
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPlan {
    /// Categories to search, in presentation order
    pub categories: Vec<VenueCategory>,

    /// Maximum venues requested per category
    pub results_per_category: u16,
}

impl DiscoveryPlan {
    /// Build a plan from the configured category list.
    ///
    /// Unknown tags and repeats are logged and skipped. An empty or
    /// fully invalid list falls back to the default categories.
    pub fn from_config(config: &Config) -> Self {
        let mut categories: Vec<VenueCategory> = vec![];
        for tag in config.search_categories.split(',') {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }

            match tag.parse::<VenueCategory>() {
                Ok(category) if categories.contains(&category) => {
                    engine_warn!("(from_config) duplicate category [{}], ignoring.", category);
                }
                Ok(category) => categories.push(category),
                Err(e) => engine_warn!("(from_config) {}, ignoring.", e),
            }
        }

        if categories.is_empty() {
            engine_warn!("(from_config) no valid categories configured, using defaults.");
            categories = DEFAULT_CATEGORIES.to_vec();
        }

        DiscoveryPlan {
            categories,
            results_per_category: config.results_per_category,
        }
    }
}

/// Search every planned category around the midpoint concurrently.
///
/// Results keep the plan's category order regardless of which search
/// answers first.
pub async fn discover_venues(
    midpoint: &GeoPoint,
    plan: &DiscoveryPlan,
    clients: &Clients,
) -> Vec<Venue> {
    let mut set = JoinSet::new();
    for (index, category) in plan.categories.iter().enumerate() {
        let places = clients.places.clone();
        let near = *midpoint;
        let category = *category;
        let limit = plan.results_per_category;
        set.spawn(async move {
            (
                index,
                category,
                places.search_category(category, &near, limit).await,
            )
        });
    }

    let mut slots: Vec<Option<Vec<Venue>>> = vec![None; plan.categories.len()];
    while let Some(joined) = set.join_next().await {
        let Ok((index, category, result)) = joined else {
            engine_warn!("(discover_venues) category search task failed to join.");
            continue;
        };

        match result {
            Ok(venues) => {
                engine_debug!(
                    "(discover_venues) [{}] search returned [{}] venues.",
                    category,
                    venues.len()
                );
                slots[index] = Some(venues);
            }
            Err(e) => {
                engine_warn!(
                    "(discover_venues) [{}] search failed, skipping category: {}",
                    category,
                    e
                );
            }
        }
    }

    let venues: Vec<Venue> = slots.into_iter().flatten().flatten().collect();
    engine_info!(
        "(discover_venues) discovered [{}] candidate venues.",
        venues.len()
    );

    venues
}
