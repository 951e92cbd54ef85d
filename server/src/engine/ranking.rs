//! Fairness ranking of evaluated venues.
//!
//! A venue is fairer when the two participants drive for a similar
//! amount of time. Among venues that are about equally fair, the one
//! with the lower combined driving time wins.

use crate::engine::evaluation::EvaluatedVenue;
use std::cmp::Ordering;

/// Venues within this many minutes of each other count as equally fair
pub const FAIRNESS_TOLERANCE_MINUTES: i32 = 2;

/// Maximum venues kept after ranking
pub const MAX_RANKED_VENUES: usize = 10;

/// Compare two venues by fairness
fn compare_fairness(a: &EvaluatedVenue, b: &EvaluatedVenue) -> Ordering {
    if (a.time_difference - b.time_difference).abs() > FAIRNESS_TOLERANCE_MINUTES {
        a.time_difference.cmp(&b.time_difference)
    } else {
        a.total_drive_time.cmp(&b.total_drive_time)
    }
}

/// Order venues by fairness and keep the top [MAX_RANKED_VENUES].
///
/// The sort is stable, venues that compare equal keep their discovery
/// order.
pub fn rank_venues(mut venues: Vec<EvaluatedVenue>) -> Vec<EvaluatedVenue> {
    venues.sort_by(compare_fairness);
    venues.truncate(MAX_RANKED_VENUES);

    engine_debug!("(rank_venues) kept [{}] ranked venues.", venues.len());
    venues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::evaluated_venue;

    #[tokio::test]
    async fn test_rank_venues_fairness_order() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_fairness_order) Start.");

        let venues = vec![
            evaluated_venue("Trailside Grill", 10, 12),
            evaluated_venue("Both Ways Cafe", 8, 8),
            evaluated_venue("Longhaul Tavern", 5, 20),
            evaluated_venue("Split Rock Diner", 14, 13),
        ];

        let ranked = rank_venues(venues);
        let names: Vec<&str> = ranked
            .iter()
            .map(|venue| venue.venue.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "Both Ways Cafe",
                "Trailside Grill",
                "Split Rock Diner",
                "Longhaul Tavern",
            ]
        );

        ut_info!("(test_rank_venues_fairness_order) Success.");
    }

    #[tokio::test]
    async fn test_rank_venues_tolerance_band() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_tolerance_band) Start.");

        // (time_difference, total_drive_time) per venue:
        //   V1 (1, 25), V2 (2, 28), V3 (0, 30), V4 (6, 10), V5 (8, 50), V6 (15, 19)
        let expected = vec![
            evaluated_venue("V1", 13, 12),
            evaluated_venue("V2", 15, 13),
            evaluated_venue("V3", 15, 15),
            evaluated_venue("V4", 8, 2),
            evaluated_venue("V5", 29, 21),
            evaluated_venue("V6", 17, 2),
        ];

        let mut venues = expected.clone();
        venues.reverse();
        let ranked = rank_venues(venues);
        assert_eq!(ranked, expected);

        // Every adjacent pair in the output honors the comparison
        for pair in ranked.windows(2) {
            assert_ne!(compare_fairness(&pair[0], &pair[1]), Ordering::Greater);
        }

        ut_info!("(test_rank_venues_tolerance_band) Success.");
    }

    #[tokio::test]
    async fn test_rank_venues_stable_on_ties() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_stable_on_ties) Start.");

        let venues = vec![
            evaluated_venue("First In", 10, 10),
            evaluated_venue("Second In", 10, 10),
            evaluated_venue("Third In", 10, 10),
        ];

        let ranked = rank_venues(venues);
        let names: Vec<&str> = ranked
            .iter()
            .map(|venue| venue.venue.name.as_str())
            .collect();
        assert_eq!(names, vec!["First In", "Second In", "Third In"]);

        ut_info!("(test_rank_venues_stable_on_ties) Success.");
    }

    #[tokio::test]
    async fn test_rank_venues_truncates_to_ten() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_truncates_to_ten) Start.");

        // Twenty venues with time differences 57 down to 0 in steps of 3
        let venues: Vec<EvaluatedVenue> = (0..20)
            .rev()
            .map(|n| evaluated_venue(&format!("V{}", n), 10, 10 + 3 * n))
            .collect();

        let ranked = rank_venues(venues);
        assert_eq!(ranked.len(), MAX_RANKED_VENUES);

        let differences: Vec<i32> = ranked.iter().map(|venue| venue.time_difference).collect();
        assert_eq!(
            differences,
            vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27]
        );

        ut_info!("(test_rank_venues_truncates_to_ten) Success.");
    }

    #[tokio::test]
    async fn test_rank_venues_large_candidate_set() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_large_candidate_set) Start.");

        // Twelve groups of ten venues. A group shares one time
        // difference and consecutive groups sit three minutes apart,
        // just past the tolerance. Totals descend inside a group and
        // groups arrive worst first, so nearly every venue has to move.
        let mut venues: Vec<EvaluatedVenue> = vec![];
        for group in (0..12).rev() {
            for member in 0..10 {
                let drive_time_a = 20 - member;
                venues.push(evaluated_venue(
                    &format!("V{}-{}", group, member),
                    drive_time_a,
                    drive_time_a + 3 * group,
                ));
            }
        }
        assert_eq!(venues.len(), 120);

        let ranked = rank_venues(venues);
        assert_eq!(ranked.len(), MAX_RANKED_VENUES);

        // Only the equal-drive group fits the cap, lowest totals first
        assert!(ranked.iter().all(|venue| venue.time_difference == 0));
        let totals: Vec<i32> = ranked
            .iter()
            .map(|venue| venue.total_drive_time)
            .collect();
        assert_eq!(totals, vec![22, 24, 26, 28, 30, 32, 34, 36, 38, 40]);

        // Every adjacent pair in the output honors the comparison
        for pair in ranked.windows(2) {
            assert_ne!(compare_fairness(&pair[0], &pair[1]), Ordering::Greater);
        }

        ut_info!("(test_rank_venues_large_candidate_set) Success.");
    }

    #[tokio::test]
    async fn test_rank_venues_empty() {
        crate::get_log_handle().await;
        ut_info!("(test_rank_venues_empty) Start.");

        assert!(rank_venues(vec![]).is_empty());

        ut_info!("(test_rank_venues_empty) Success.");
    }
}
