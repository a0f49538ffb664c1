use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use crate::models::coordinate::{Coordinate, CoordinateError};
use crate::repositories::ip_geolocation_repo::IpGeolocationRepo;

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Manual,
    Auto,
}

/// Every way of ending up without a reference coordinate. The messages are
/// shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("Please enter both latitude and longitude.")]
    Unset,
    /// A zero latitude or longitude cannot be told apart from an untouched
    /// input, so it is refused. Points on the equator or the prime meridian
    /// cannot be entered manually.
    #[error("Latitude and longitude must both be non-zero.")]
    ZeroCoordinate,
    #[error("Invalid coordinates: {0}")]
    Invalid(#[from] CoordinateError),
    #[error("Unable to fetch location from IP ({0}). Please enter coordinates manually.")]
    LookupFailed(String),
}

pub struct LocationResolver {
    ip_geolocation_repo: IpGeolocationRepo,
}

impl LocationResolver {
    pub fn new(ip_geolocation_repo: IpGeolocationRepo) -> Self {
        Self { ip_geolocation_repo }
    }

    pub async fn resolve(
        &self,
        mode: LocationMode,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<Coordinate, LocationError> {
        match mode {
            LocationMode::Manual => resolve_manual(lat, lng),
            LocationMode::Auto => self.resolve_automatic().await,
        }
    }

    /// One lookup, no retry.
    pub async fn resolve_automatic(&self) -> Result<Coordinate, LocationError> {
        match self.ip_geolocation_repo.lookup().await {
            Ok(coordinate) => Ok(coordinate),
            Err(e) => {
                warn!("IP geolocation failed due to: {:#}", e);
                Err(LocationError::LookupFailed(format!("{:#}", e)))
            }
        }
    }
}

pub fn resolve_manual(
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Coordinate, LocationError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(LocationError::Unset);
    };
    if lat == 0.0 || lng == 0.0 {
        return Err(LocationError::ZeroCoordinate);
    }

    Ok(Coordinate::new(lat, lng)?)
}
