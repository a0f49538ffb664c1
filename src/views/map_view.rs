use serde::Serialize;
use serde_with::skip_serializing_none;
use crate::models::coordinate::Coordinate;
use crate::models::search::{RankedPlace, SearchResult};
use crate::views::list_view::rating_label;

pub const DEFAULT_ZOOM: u8 = 14;
pub const POPUP_MAX_WIDTH: u32 = 300;
pub const HOSPITAL_LAYER: &str = "Hospitals";

#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct MarkerIcon {
    pub color: &'static str,
    pub icon: &'static str,
}

const USER_ICON: MarkerIcon = MarkerIcon { color: "red", icon: "home" };
const HOSPITAL_ICON: MarkerIcon = MarkerIcon { color: "blue", icon: "info-sign" };

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    pub max_width: Option<u32>,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MapMarker {
    pub location: Coordinate,
    pub icon: MarkerIcon,
    pub popup: Popup,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MarkerLayer {
    pub name: &'static str,
    pub markers: Vec<MapMarker>,
}

/// Everything a map widget needs: where to centre, the user's marker and a
/// toggleable layer of hospital markers.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom_start: u8,
    pub user_marker: MapMarker,
    pub layers: Vec<MarkerLayer>,
}

fn hospital_marker(ranked: &RankedPlace) -> MapMarker {
    let place = &ranked.place;
    MapMarker {
        location: place.location,
        icon: HOSPITAL_ICON,
        popup: Popup {
            title: place.display_name().to_string(),
            lines: vec![
                format!("Distance: {}km", ranked.distance_km),
                format!("Rating: {}", rating_label(place.rating)),
                format!(
                    "Address: {}",
                    place.address.as_deref().unwrap_or("No address available")
                ),
            ],
            max_width: Some(POPUP_MAX_WIDTH),
        },
    }
}

pub fn render_map(result: &SearchResult) -> MapView {
    let reference = result.query().reference();

    MapView {
        center: reference,
        zoom_start: DEFAULT_ZOOM,
        user_marker: MapMarker {
            location: reference,
            icon: USER_ICON,
            popup: Popup {
                title: "Your Location".to_string(),
                lines: vec![],
                max_width: None,
            },
        },
        layers: vec![MarkerLayer {
            name: HOSPITAL_LAYER,
            markers: result.places().iter().map(hospital_marker).collect(),
        }],
    }
}
