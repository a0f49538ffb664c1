use anyhow::{anyhow, Context};
use reqwest::Client;
use serde::Deserialize;
use crate::models::coordinate::Coordinate;

/// Body of an ipinfo-style lookup: `loc` holds `"lat,lng"`.
#[derive(Clone, Deserialize, Debug)]
pub struct IpLookupResponse {
    pub loc: Option<String>,
}

/// Best-effort geolocation of the host's public IP address.
#[derive(Clone)]
pub struct IpGeolocationRepo {
    client: Client,
    lookup_url: String,
}

impl IpGeolocationRepo {
    pub fn new(
        client: Client,
        lookup_url: &str,
    ) -> Self {
        Self {
            client,
            lookup_url: lookup_url.to_string(),
        }
    }

    pub async fn lookup(&self) -> anyhow::Result<Coordinate> {
        let response = self.client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("IP lookup service unreachable")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("IP lookup service returned an error status")?
            .json::<IpLookupResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .context("IP lookup service returned an unreadable body")?;

        let loc = response
            .loc
            .ok_or_else(|| anyhow!("IP lookup did not return a location"))?;

        parse_loc(&loc)
    }
}

pub fn parse_loc(loc: &str) -> anyhow::Result<Coordinate> {
    let (lat, lng) = loc
        .split_once(',')
        .ok_or_else(|| anyhow!("ambiguous IP location: {:?}", loc))?;
    let lat: f64 = lat.trim().parse().context("parse latitude")?;
    let lng: f64 = lng.trim().parse().context("parse longitude")?;

    Ok(Coordinate::new(lat, lng)?)
}
