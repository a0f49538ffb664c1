use anyhow::anyhow;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use crate::models::coordinate::Coordinate;
use crate::models::place::{OpeningHours, PlaceDetails, PlaceRecord, PlaceReview};

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Clone, Deserialize, Debug)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<Value>,
    pub error_message: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: String,
    pub result: Option<RawPlaceDetails>,
    pub error_message: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawPlace {
    pub place_id: String,
    pub name: Option<String>,
    pub geometry: Geometry,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub opening_hours: Option<RawOpeningHours>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawOpeningHours {
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Clone, Deserialize, Debug, Default)]
pub struct RawPlaceDetails {
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<RawOpeningHours>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawReview {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time_description: Option<String>,
}

/// Google reports most failures (bad key, quota) with a 200 and a status
/// string, so both are checked. A missing status is accepted.
pub fn ensure_status_ok(status: &str, error_message: Option<&str>) -> anyhow::Result<()> {
    match status {
        "" | STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        other => Err(anyhow!(
            "places API returned status {}: {}",
            other,
            error_message.unwrap_or("no error message")
        )),
    }
}

fn known_rating(rating: Option<f64>) -> Option<f64> {
    rating.filter(|r| r.is_finite() && (0.0..=5.0).contains(r))
}

impl TryFrom<RawPlace> for PlaceRecord {
    type Error = anyhow::Error;

    fn try_from(raw: RawPlace) -> anyhow::Result<Self> {
        let location = Coordinate::new(raw.geometry.location.lat, raw.geometry.location.lng)?;

        Ok(PlaceRecord {
            place_id: raw.place_id,
            name: raw.name,
            location,
            rating: known_rating(raw.rating),
            address: raw.vicinity,
            phone_number: None,
            website: None,
            open_now: raw.opening_hours.and_then(|hours| hours.open_now),
        })
    }
}

/// Normalizes every entry of a nearby-search `results` array. Entries that
/// cannot be parsed are skipped one by one.
pub fn parse_place_records(results: Vec<Value>) -> Vec<PlaceRecord> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let parsed = serde_json::from_value::<RawPlace>(entry)
                .map_err(anyhow::Error::from)
                .and_then(PlaceRecord::try_from);
            match parsed {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed place entry at index {} due to: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

impl From<RawOpeningHours> for OpeningHours {
    fn from(raw: RawOpeningHours) -> Self {
        OpeningHours {
            open_now: raw.open_now,
            weekday_text: raw.weekday_text,
        }
    }
}

impl From<RawPlaceDetails> for PlaceDetails {
    fn from(raw: RawPlaceDetails) -> Self {
        PlaceDetails {
            formatted_phone_number: raw.formatted_phone_number,
            website: raw.website,
            opening_hours: raw.opening_hours.map(OpeningHours::from),
            reviews: raw
                .reviews
                .into_iter()
                .map(|review| PlaceReview {
                    author_name: review.author_name,
                    rating: known_rating(review.rating),
                    text: review.text,
                    relative_time_description: review.relative_time_description,
                })
                .collect(),
        }
    }
}
