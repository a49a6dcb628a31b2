use crate::models::{Attraction, Coordinates, Degradation, Hotel, Place};
use crate::services::distance_service::{centroid, distance};

/// The hotel picked for a day, or the reason none could be sited properly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotelChoice<'a> {
    pub hotel: Option<&'a Hotel>,
    pub note: Option<Degradation>,
}

/// Picks the candidate nearest to the centroid of `cluster`.
///
/// An empty cluster, or one in which nothing has coordinates, falls back to
/// the first candidate. Candidates without coordinates are infinitely far
/// away; ties go to the earlier candidate.
pub fn closest_to_cluster<'a, C: Place, P: Place>(
    candidates: &'a [C],
    cluster: &[P],
) -> (Option<&'a C>, Option<Degradation>) {
    let Some(first) = candidates.first() else {
        return (None, Some(Degradation::EmptyPool));
    };
    if cluster.is_empty() {
        return (Some(first), None);
    }

    let points: Vec<Coordinates> = cluster.iter().filter_map(|p| p.coordinates()).collect();
    let Some(center) = centroid(&points) else {
        return (Some(first), Some(Degradation::MissingCoordinates));
    };

    let mut best = first;
    let mut best_distance = distance(Some(center), first.coordinates());
    for candidate in &candidates[1..] {
        let d = distance(Some(center), candidate.coordinates());
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }
    (Some(best), None)
}

pub fn closest_hotel<'a>(hotels: &'a [Hotel], attractions: &[Attraction]) -> HotelChoice<'a> {
    let (hotel, note) = closest_to_cluster(hotels, attractions);
    HotelChoice { hotel, note }
}
