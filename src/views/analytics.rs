use serde::Serialize;
use crate::models::search::RankedPlace;

#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: usize,
}

/// Aggregates over the displayed hospitals. Averages and the minimum are
/// `None` when there is nothing to aggregate.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Analytics {
    pub total_hospitals: usize,
    pub average_rating: Option<f64>,
    pub average_distance_km: Option<f64>,
    pub closest_distance_km: Option<f64>,
    pub rating_distribution: Vec<RatingBucket>,
    pub unrated_count: usize,
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Counts per distinct rating, most frequent first, ties by higher rating.
pub fn rating_distribution(ratings: &[f64]) -> Vec<RatingBucket> {
    let mut buckets: Vec<RatingBucket> = Vec::new();
    for &rating in ratings {
        match buckets.iter_mut().find(|bucket| bucket.rating == rating) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(RatingBucket { rating, count: 1 }),
        }
    }
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then(b.rating.total_cmp(&a.rating)));
    buckets
}

pub fn summarize(places: &[RankedPlace]) -> Analytics {
    let ratings: Vec<f64> = places.iter().filter_map(|r| r.place.rating).collect();
    let distances: Vec<f64> = places.iter().map(|r| r.distance_km).collect();

    Analytics {
        total_hospitals: places.len(),
        average_rating: mean(&ratings).map(round_2dp),
        average_distance_km: mean(&distances).map(round_2dp),
        closest_distance_km: distances.iter().copied().reduce(f64::min).map(round_2dp),
        rating_distribution: rating_distribution(&ratings),
        unrated_count: places.len() - ratings.len(),
    }
}
