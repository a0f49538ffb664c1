use anyhow::Context;
use reqwest::Client;
use tracing::debug;
use crate::models::coordinate::Coordinate;
use crate::models::google_places::{
    ensure_status_ok, parse_place_records, NearbySearchResponse, PlaceDetailsResponse,
};
use crate::models::place::{PlaceDetails, PlaceRecord};

pub const PLACE_TYPE: &str = "hospital";
pub const DETAIL_FIELDS: &str = "formatted_phone_number,website,opening_hours,reviews";

/// Thin client over the places nearby-search and details endpoints.
///
/// Every call is a single GET bounded by the timeout configured on the
/// shared `reqwest::Client`. Nothing is cached.
#[derive(Clone)]
pub struct GooglePlacesRepo {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesRepo {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn search_nearby(
        &self,
        location: Coordinate,
        radius_meters: u32,
        keyword: Option<&str>,
    ) -> anyhow::Result<Vec<PlaceRecord>> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let mut params = vec![
            ("location", location.to_query_value()),
            ("radius", radius_meters.to_string()),
            ("type", PLACE_TYPE.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(keyword) = keyword {
            params.push(("keyword", keyword.to_string()));
        }

        let response = self.client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("nearby search request failed")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("nearby search returned an error status")?
            .json::<NearbySearchResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .context("nearby search returned an unreadable body")?;

        ensure_status_ok(&response.status, response.error_message.as_deref())?;
        debug!("Nearby search returned {} raw entries", response.results.len());

        Ok(parse_place_records(response.results))
    }

    pub async fn get_details(
        &self,
        place_id: &str,
    ) -> anyhow::Result<PlaceDetails> {
        let url = format!("{}/details/json", self.base_url);
        let params = [
            ("place_id", place_id),
            ("fields", DETAIL_FIELDS),
            ("key", self.api_key.as_str()),
        ];

        let response = self.client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("place details request failed")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("place details returned an error status")?
            .json::<PlaceDetailsResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .context("place details returned an unreadable body")?;

        ensure_status_ok(&response.status, response.error_message.as_deref())?;

        Ok(response.result.map(PlaceDetails::from).unwrap_or_default())
    }
}
