use anyhow::{anyhow, Context};
use csv::Writer;
use crate::models::search::RankedPlace;

pub const EXPORT_FILE_NAME: &str = "nearby_hospitals.csv";
pub const EXPORT_HEADER: [&str; 6] = [
    "Name",
    "Address",
    "Rating",
    "Distance (km)",
    "Latitude",
    "Longitude",
];
pub const NO_RATING: &str = "No rating";

/// Serializes the displayed places as UTF-8 CSV, one row per place.
pub fn export_csv(places: &[RankedPlace]) -> anyhow::Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADER)
        .context("Failed writing export header")?;

    for ranked in places {
        let place = &ranked.place;
        let rating = place
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| NO_RATING.to_string());
        writer
            .write_record([
                place.display_name(),
                place.display_address(),
                rating.as_str(),
                format!("{:.2}", ranked.distance_km).as_str(),
                place.location.lat().to_string().as_str(),
                place.location.lng().to_string().as_str(),
            ])
            .with_context(|| format!("Failed writing export row for {}", place.place_id))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed flushing export writer: {}", e.error()))?;

    String::from_utf8(bytes).context("Export is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::Coordinate;
    use crate::models::place::PlaceRecord;

    fn ranked(name: &str, rating: Option<f64>, distance_km: f64, lat: f64, lng: f64) -> RankedPlace {
        RankedPlace {
            place: PlaceRecord {
                place_id: name.to_lowercase(),
                name: Some(name.to_string()),
                location: Coordinate::new(lat, lng).unwrap(),
                rating,
                address: Some(format!("{} Street, New York", name)),
                phone_number: None,
                website: None,
                open_now: None,
            },
            distance_km,
        }
    }

    #[test]
    fn writes_header_and_sentinel_for_missing_rating() {
        let csv = export_csv(&[
            ranked("A", Some(4.0), 1.23, 40.72, -74.0),
            ranked("B", None, 2.5, 40.7, -73.99),
        ])
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Address,Rating,Distance (km),Latitude,Longitude");
        assert_eq!(lines[1], "A,\"A Street, New York\",4.0,1.23,40.72,-74");
        assert_eq!(lines[2], "B,\"B Street, New York\",No rating,2.50,40.7,-73.99");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn unknown_name_and_address_use_placeholder() {
        let mut place = ranked("C", Some(3.5), 0.4, 1.0, 2.0);
        place.place.name = None;
        place.place.address = None;

        let csv = export_csv(&[place]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("N/A,N/A,3.5,0.40,1,2"));
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv, "Name,Address,Rating,Distance (km),Latitude,Longitude\n");
    }
}
