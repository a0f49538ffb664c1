use serde::Serialize;
use thiserror::Error;
use crate::models::coordinate::Coordinate;
use crate::models::place::PlaceRecord;

pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 20;
pub const DEFAULT_RADIUS_KM: u32 = 5;
pub const MIN_RATING_FLOOR: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Number of records kept for display after filtering.
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("search radius must be between 1 and 20 km, got {0}")]
    RadiusOutOfRange(u32),
    #[error("minimum rating must be between 1.0 and 5.0, got {0}")]
    MinRatingOutOfRange(f64),
}

/// The user-chosen filters of a search, validated before any network call.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct SearchFilters {
    radius_meters: u32,
    keyword: Option<String>,
    min_rating: f64,
}

impl SearchFilters {
    pub fn new(
        radius_km: u32,
        keyword: Option<String>,
        min_rating: f64,
    ) -> Result<Self, QueryError> {
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(QueryError::RadiusOutOfRange(radius_km));
        }
        if !min_rating.is_finite() || !(MIN_RATING_FLOOR..=MAX_RATING).contains(&min_rating) {
            return Err(QueryError::MinRatingOutOfRange(min_rating));
        }

        let keyword = keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            radius_meters: radius_km * 1000,
            keyword,
            min_rating,
        })
    }

    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct SearchQuery {
    reference: Coordinate,
    #[serde(flatten)]
    filters: SearchFilters,
}

impl SearchQuery {
    pub fn new(reference: Coordinate, filters: SearchFilters) -> Self {
        Self { reference, filters }
    }

    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    pub fn radius_meters(&self) -> u32 {
        self.filters.radius_meters
    }

    pub fn keyword(&self) -> Option<&str> {
        self.filters.keyword()
    }

    pub fn min_rating(&self) -> f64 {
        self.filters.min_rating
    }
}

/// A place annotated with its distance from the search reference.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: PlaceRecord,
    pub distance_km: f64,
}

/// Filtered, distance-annotated places in upstream order, together with the
/// query that produced them. Only built by the ranker.
#[derive(Clone, Serialize, Debug)]
pub struct SearchResult {
    query: SearchQuery,
    places: Vec<RankedPlace>,
}

impl SearchResult {
    pub(crate) fn new(query: SearchQuery, places: Vec<RankedPlace>) -> Self {
        Self { query, places }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn places(&self) -> &[RankedPlace] {
        &self.places
    }

    pub fn places_mut(&mut self) -> impl Iterator<Item = &mut PlaceRecord> {
        self.places.iter_mut().map(|ranked| &mut ranked.place)
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
