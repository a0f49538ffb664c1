use serde::Serialize;
use serde_with::skip_serializing_none;
use crate::models::coordinate::Coordinate;

/// One hospital returned by the nearby search, normalized.
///
/// Fields the upstream response left out stay `None`; in particular a
/// missing rating is never coerced to zero.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: Option<String>,
    pub location: Coordinate,
    pub rating: Option<f64>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub open_now: Option<bool>,
}

impl PlaceRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("N/A")
    }

    /// Copies whatever the details lookup returned onto this record. Fields
    /// the lookup did not return keep their current value.
    pub fn apply_details(&mut self, details: &PlaceDetails) {
        if let Some(phone_number) = &details.formatted_phone_number {
            self.phone_number = Some(phone_number.clone());
        }
        if let Some(website) = &details.website {
            self.website = Some(website.clone());
        }
        if let Some(open_now) = details.opening_hours.as_ref().and_then(|h| h.open_now) {
            self.open_now = Some(open_now);
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct PlaceDetails {
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub reviews: Vec<PlaceReview>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    pub weekday_text: Vec<String>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct PlaceReview {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time_description: Option<String>,
}
