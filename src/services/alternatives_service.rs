use crate::models::Place;
use crate::services::distance_service::distance;

pub const DEFAULT_MAX_ALTERNATIVES: usize = 2;

/// Up to `max_results` pool members nearest to the venue named by
/// `current_identity`, which is itself never returned.
///
/// Members without coordinates, or every member when the current venue is
/// unplaced or absent from the pool, rank last in pool order.
pub fn closest_alternatives<'a, P: Place>(
    current_identity: &str,
    pool: &'a [P],
    max_results: usize,
) -> Vec<&'a P> {
    let reference = pool
        .iter()
        .find(|venue| venue.matches(current_identity))
        .and_then(|venue| venue.coordinates());

    let mut ranked: Vec<(f64, &'a P)> = pool
        .iter()
        .filter(|venue| !venue.matches(current_identity))
        .map(|venue| (distance(reference, venue.coordinates()), venue))
        .collect();

    // sort_by is stable, so equal distances keep pool order.
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(max_results)
        .map(|(_, venue)| venue)
        .collect()
}
