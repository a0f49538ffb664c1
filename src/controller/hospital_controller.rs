use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::controller::AppState;
use crate::helpers::api_error::ApiError;
use crate::helpers::api_query::ApiQuery;
use crate::models::place::PlaceDetails;
use crate::models::search::{SearchFilters, DEFAULT_MIN_RATING, DEFAULT_RADIUS_KM};
use crate::services::location_resolver::{LocationMode, LocationResolver};
use crate::services::search_pipeline::{HospitalSearchService, SearchOutcome, SearchRequest};
use crate::views::analytics::{summarize, Analytics};
use crate::views::csv_export::{export_csv, EXPORT_FILE_NAME};
use crate::views::list_view::{render_list, ListView};
use crate::views::map_view::{render_map, MapView};
use crate::views::{render_dashboard, Dashboard};

pub fn router(app_state: AppState) -> Router {
    let search_service = Arc::new(HospitalSearchService::new(
        app_state.places_repo,
        LocationResolver::new(app_state.ip_geolocation_repo),
    ));

    Router::new()
        .route("/list", get(list_hospitals))
        .route("/map", get(map_hospitals))
        .route("/analytics", get(hospital_analytics))
        .route("/export", get(export_hospitals))
        .route("/dashboard", get(hospital_dashboard))
        .route("/details", get(hospital_details))
        .route_layer(Extension(search_service))
}

#[derive(Clone, Serialize, Debug)]
pub struct ViewResponse<T> {
    pub data: T,
    pub notices: Vec<String>,
}

#[derive(Clone, Deserialize, Debug, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub location_mode: LocationMode,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<u32>,
    pub keyword: Option<String>,
    pub min_rating: Option<f64>,
    /// Fetch phone, website and hours for every listed hospital.
    #[serde(default)]
    pub details: bool,
}

impl TryFrom<SearchParams> for SearchRequest {
    type Error = ApiError;

    fn try_from(params: SearchParams) -> Result<Self, ApiError> {
        let filters = SearchFilters::new(
            params.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            params.keyword,
            params.min_rating.unwrap_or(DEFAULT_MIN_RATING),
        )?;

        Ok(SearchRequest {
            location_mode: params.location_mode,
            lat: params.lat,
            lng: params.lon,
            filters,
        })
    }
}

async fn run_search(
    search_service: &HospitalSearchService,
    params: SearchParams,
) -> Result<SearchOutcome, ApiError> {
    let with_details = params.details;
    let request = SearchRequest::try_from(params)?;

    let mut outcome = search_service.search(request).await?;
    if with_details {
        search_service.enrich_with_details(&mut outcome).await;
    }

    Ok(outcome)
}

pub async fn list_hospitals(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ViewResponse<ListView>>, ApiError> {
    let outcome = run_search(&search_service, params).await?;

    Ok(Json(ViewResponse {
        data: render_list(&outcome.result),
        notices: outcome.notices,
    }))
}

pub async fn map_hospitals(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ViewResponse<MapView>>, ApiError> {
    let outcome = run_search(&search_service, SearchParams { details: false, ..params }).await?;

    Ok(Json(ViewResponse {
        data: render_map(&outcome.result),
        notices: outcome.notices,
    }))
}

pub async fn hospital_analytics(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ViewResponse<Analytics>>, ApiError> {
    let outcome = run_search(&search_service, SearchParams { details: false, ..params }).await?;

    Ok(Json(ViewResponse {
        data: summarize(outcome.result.places()),
        notices: outcome.notices,
    }))
}

pub async fn export_hospitals(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = run_search(&search_service, SearchParams { details: false, ..params }).await?;
    let csv = export_csv(outcome.result.places())
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME)),
        ],
        csv,
    ))
}

pub async fn hospital_dashboard(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ViewResponse<Dashboard>>, ApiError> {
    let outcome = run_search(&search_service, params).await?;

    Ok(Json(ViewResponse {
        data: render_dashboard(&outcome.result, OffsetDateTime::now_utc()),
        notices: outcome.notices,
    }))
}

#[derive(Clone, Deserialize, Debug)]
pub struct DetailsParams {
    pub place_id: String,
}

/// A failed lookup is still a 200: an empty record plus a notice. Only a
/// blank id is refused.
pub async fn hospital_details(
    Extension(search_service): Extension<Arc<HospitalSearchService>>,
    ApiQuery(params): ApiQuery<DetailsParams>,
) -> Result<Json<ViewResponse<PlaceDetails>>, ApiError> {
    let place_id = params.place_id.trim();
    if place_id.is_empty() {
        return Err(ApiError::BadRequest("place_id must not be empty".to_string()));
    }

    let (details, notice) = search_service.place_details(place_id).await;

    Ok(Json(ViewResponse {
        data: details,
        notices: notice.into_iter().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_filters_fall_back_to_defaults() {
        let request = SearchRequest::try_from(SearchParams::default()).unwrap();

        assert_eq!(request.location_mode, LocationMode::Manual);
        assert_eq!(request.filters.radius_meters(), DEFAULT_RADIUS_KM * 1000);
        assert_eq!(request.filters.min_rating(), DEFAULT_MIN_RATING);
        assert_eq!(request.filters.keyword(), None);
    }
}
