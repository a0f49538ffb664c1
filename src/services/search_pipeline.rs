use thiserror::Error;
use tracing::{info, warn};
use crate::models::place::PlaceDetails;
use crate::models::search::{SearchFilters, SearchQuery, SearchResult};
use crate::repositories::google_places_repo::GooglePlacesRepo;
use crate::services::location_resolver::{LocationError, LocationMode, LocationResolver};
use crate::services::ranker::rank;

pub const NO_MATCHES_NOTICE: &str = "No hospitals found matching your criteria.";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("Error fetching hospitals: {0}")]
    Places(String),
}

/// What the user asked for in one interaction.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub location_mode: LocationMode,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub filters: SearchFilters,
}

/// A search result plus the non-fatal messages collected while building it.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub notices: Vec<String>,
}

/// Runs one search end to end: resolve the location, fetch, filter and
/// rank. All steps run one after another.
pub struct HospitalSearchService {
    places_repo: GooglePlacesRepo,
    location_resolver: LocationResolver,
}

impl HospitalSearchService {
    pub fn new(
        places_repo: GooglePlacesRepo,
        location_resolver: LocationResolver,
    ) -> Self {
        Self {
            places_repo,
            location_resolver,
        }
    }

    pub async fn search(
        &self,
        request: SearchRequest,
    ) -> Result<SearchOutcome, SearchError> {
        let reference = self.location_resolver
            .resolve(request.location_mode, request.lat, request.lng)
            .await?;
        let query = SearchQuery::new(reference, request.filters);

        let places = self.places_repo
            .search_nearby(query.reference(), query.radius_meters(), query.keyword())
            .await
            .map_err(|e| {
                warn!("Something went wrong fetching hospitals due to: {:#}", e);
                SearchError::Places(format!("{:#}", e))
            })?;

        let fetched = places.len();
        let result = rank(places, query);
        info!(
            "Search at {} kept {} of {} hospitals",
            result.query().reference().to_query_value(),
            result.places().len(),
            fetched
        );

        let mut notices = Vec::new();
        if result.is_empty() {
            notices.push(NO_MATCHES_NOTICE.to_string());
        }

        Ok(SearchOutcome { result, notices })
    }

    /// Fetches details for one place. A failed lookup yields empty details
    /// and a notice describing the failure.
    pub async fn place_details(
        &self,
        place_id: &str,
    ) -> (PlaceDetails, Option<String>) {
        match self.places_repo.get_details(place_id).await {
            Ok(details) => (details, None),
            Err(e) => {
                warn!("Something went wrong fetching details for place {} due to: {:#}", place_id, e);
                (
                    PlaceDetails::default(),
                    Some(format!("Error fetching place details: {:#}", e)),
                )
            }
        }
    }

    /// Looks up details for every displayed place, one request at a time.
    pub async fn enrich_with_details(
        &self,
        outcome: &mut SearchOutcome,
    ) {
        for place in outcome.result.places_mut() {
            let (details, notice) = self.place_details(&place.place_id).await;
            place.apply_details(&details);
            if let Some(notice) = notice {
                outcome.notices.push(notice);
            }
        }
    }
}
