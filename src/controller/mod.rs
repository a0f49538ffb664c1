use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::http::header::CONTENT_TYPE;
use axum::Router;
use reqwest::Client;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::GooglePlacesRepo;
use crate::repositories::ip_geolocation_repo::IpGeolocationRepo;

pub mod health_check;
pub mod hospital_controller;

/// Upstream clients shared by every request. Both wrap the same
/// `reqwest::Client`, which carries the request timeout.
#[derive(Clone)]
pub struct AppState {
    pub places_repo: GooglePlacesRepo,
    pub ip_geolocation_repo: IpGeolocationRepo,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Error building the HTTP client")?;

        Ok(Self {
            places_repo: GooglePlacesRepo::new(
                client.clone(),
                &config.places_base_url,
                &config.places_api_key,
            ),
            ip_geolocation_repo: IpGeolocationRepo::new(
                client,
                &config.ip_geolocation_url,
            ),
        })
    }
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::from_config(config)?;
    let application = application(app_state, config);

    let address = config.socket_addr();
    info!("API server listening on: {} ({})", address, config.environment);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

/// Routes plus CORS and the not-found fallback.
pub fn application(app_state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", s, e);
                None
            }
        })
        .collect();

    router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_origin(origins)
                        .allow_headers([CONTENT_TYPE])
                )
        )
        .fallback(page_not_found_handler)
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .nest("/hospitals", hospital_controller::router(app_state))
}
