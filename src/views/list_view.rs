use serde::Serialize;
use serde_with::skip_serializing_none;
use crate::models::coordinate::Coordinate;
use crate::models::search::{RankedPlace, SearchResult};

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ListEntry {
    pub position: usize,
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub rating: String,
    pub distance_km: f64,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub hours: Option<String>,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ListView {
    pub location_banner: String,
    pub hospitals: Vec<ListEntry>,
}

pub fn location_banner(reference: Coordinate) -> String {
    format!("Location set to: {:.4}, {:.4}", reference.lat(), reference.lng())
}

pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(rating) => format!("{}/5", rating),
        None => "No rating/5".to_string(),
    }
}

pub fn hours_label(open_now: Option<bool>) -> Option<String> {
    open_now.map(|open| if open { "Open now" } else { "Closed" }.to_string())
}

fn list_entry(position: usize, ranked: &RankedPlace) -> ListEntry {
    let place = &ranked.place;
    ListEntry {
        position,
        place_id: place.place_id.clone(),
        name: place.display_name().to_string(),
        address: place.display_address().to_string(),
        rating: rating_label(place.rating),
        distance_km: ranked.distance_km,
        phone_number: place.phone_number.clone(),
        website: place.website.clone(),
        hours: hours_label(place.open_now),
    }
}

pub fn render_list(result: &SearchResult) -> ListView {
    ListView {
        location_banner: location_banner(result.query().reference()),
        hospitals: result
            .places()
            .iter()
            .enumerate()
            .map(|(i, ranked)| list_entry(i + 1, ranked))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_uses_four_decimals() {
        let reference = Coordinate::new(40.712776, -74.005974).unwrap();
        assert_eq!(location_banner(reference), "Location set to: 40.7128, -74.0060");
    }

    #[test]
    fn labels() {
        assert_eq!(rating_label(Some(4.5)), "4.5/5");
        assert_eq!(rating_label(None), "No rating/5");
        assert_eq!(hours_label(Some(true)).as_deref(), Some("Open now"));
        assert_eq!(hours_label(Some(false)).as_deref(), Some("Closed"));
        assert_eq!(hours_label(None), None);
    }
}
