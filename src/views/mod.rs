//! View models rendered from a single [`SearchResult`].
//!
//! Each view is a pure function of the result so the list, the map and the
//! analytics always describe the same hospitals.

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use crate::models::search::SearchResult;
use crate::views::analytics::{summarize, Analytics};
use crate::views::list_view::{render_list, ListView};
use crate::views::map_view::{render_map, MapView};

pub mod analytics;
pub mod csv_export;
pub mod list_view;
pub mod map_view;

#[derive(Clone, Serialize, Debug)]
pub struct Dashboard {
    pub list: ListView,
    pub map: MapView,
    pub analytics: Analytics,
    pub last_updated: String,
}

pub fn timestamp_label(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

pub fn render_dashboard(result: &SearchResult, at: OffsetDateTime) -> Dashboard {
    Dashboard {
        list: render_list(result),
        map: render_map(result),
        analytics: summarize(result.places()),
        last_updated: timestamp_label(at),
    }
}
