use crate::models::place::PlaceRecord;
use crate::models::search::{RankedPlace, SearchQuery, SearchResult, DISPLAY_LIMIT};
use crate::services::distance::distance_km;

/// Unknown ratings never pass: a place without a rating cannot be shown to
/// satisfy any threshold.
pub fn meets_min_rating(place: &PlaceRecord, min_rating: f64) -> bool {
    matches!(place.rating, Some(rating) if rating >= min_rating)
}

/// Filters by rating, attaches distances from the query reference and keeps
/// the first [`DISPLAY_LIMIT`] in upstream order. No sorting is applied.
pub fn rank(
    places: Vec<PlaceRecord>,
    query: SearchQuery,
) -> SearchResult {
    let reference = query.reference();
    let min_rating = query.min_rating();

    let ranked = places
        .into_iter()
        .filter(|place| meets_min_rating(place, min_rating))
        .map(|place| RankedPlace {
            distance_km: distance_km(reference, place.location),
            place,
        })
        .take(DISPLAY_LIMIT)
        .collect();

    SearchResult::new(query, ranked)
}
