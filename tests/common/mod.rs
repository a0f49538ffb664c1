use std::collections::HashMap;
use std::net::TcpListener;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use medilocator_backend::config::Config;
use medilocator_backend::controller::{application, AppState};

pub const API_KEY: &str = "test-key";
pub const REFERENCE_LAT: f64 = 40.7128;
pub const REFERENCE_LNG: f64 = -74.006;

pub fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local address");
    let server = axum::Server::from_tcp(listener)
        .expect("Failed to start server")
        .serve(router.into_make_service());

    tokio::spawn(async move {
        server.await.unwrap();
    });

    format!("http://{}", addr)
}

fn hospitals() -> serde_json::Value {
    json!([
        {
            "place_id": "p1",
            "name": "Bellevue Hospital",
            "geometry": { "location": { "lat": 40.7390, "lng": -73.9754 } },
            "rating": 5.0,
            "vicinity": "462 1st Avenue, New York"
        },
        {
            "place_id": "p2",
            "name": "Low Rated Clinic",
            "geometry": { "location": { "lat": 40.7200, "lng": -74.0000 } },
            "rating": 2.0,
            "vicinity": "1 Canal Street, New York"
        },
        {
            "place_id": "p3",
            "name": "NYU Langone",
            "geometry": { "location": { "lat": 40.7421, "lng": -73.9739 } },
            "rating": 4.0,
            "vicinity": "550 1st Avenue, New York",
            "opening_hours": { "open_now": true }
        }
    ])
}

async fn nearby_search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let well_formed = params.get("key").map(String::as_str) == Some(API_KEY)
        && params.get("type").map(String::as_str) == Some("hospital")
        && params.get("location").map(String::as_str) == Some("40.7128,-74.006")
        && params.contains_key("radius");
    if !well_formed {
        return (StatusCode::BAD_REQUEST, Json(json!({ "unexpected": params }))).into_response();
    }

    match params.get("keyword").map(String::as_str) {
        None => Json(json!({ "status": "OK", "results": hospitals() })).into_response(),
        Some("malformed") => Json(json!({
            "status": "OK",
            "results": [
                { "place_id": "no-geometry", "name": "Nowhere", "rating": 4.0 },
                {
                    "place_id": "unrated",
                    "name": "Unrated Hospital",
                    "geometry": { "location": { "lat": 40.73, "lng": -74.0 } }
                },
                {
                    "place_id": "valid",
                    "name": "Valid Hospital",
                    "geometry": { "location": { "lat": 40.75, "lng": -73.99 } },
                    "rating": 3.9
                }
            ]
        }))
        .into_response(),
        Some("denied") => Json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }))
        .into_response(),
        Some("none") => Json(json!({ "status": "ZERO_RESULTS", "results": [] })).into_response(),
        Some(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
    }
}

async fn place_details(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let fields = params.get("fields").map(String::as_str);
    if fields != Some("formatted_phone_number,website,opening_hours,reviews") {
        return (StatusCode::BAD_REQUEST, "missing fields").into_response();
    }

    match params.get("place_id").map(String::as_str) {
        Some("p1") => Json(json!({
            "status": "OK",
            "result": {
                "formatted_phone_number": "(212) 562-4141",
                "website": "https://www.nychealthandhospitals.org/bellevue/",
                "opening_hours": { "open_now": true, "weekday_text": ["Monday: Open 24 hours"] },
                "reviews": [{ "author_name": "Sam", "rating": 5, "text": "Quick triage" }]
            }
        }))
        .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "details unavailable").into_response(),
    }
}

/// Fake places API and IP lookup service.
pub fn spawn_upstream() -> String {
    let router = Router::new()
        .route("/nearbysearch/json", get(nearby_search))
        .route("/details/json", get(place_details))
        .route("/ip/ok", get(|| async { Json(json!({ "ip": "203.0.113.7", "loc": "40.7128,-74.0060" })) }))
        .route("/ip/fail", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));

    spawn(router)
}

/// Starts the real application against the fake upstream. `ip_path` picks
/// which IP lookup route automatic location uses.
pub fn spawn_app(ip_path: &str) -> String {
    let upstream = spawn_upstream();
    let ip_url = format!("{}{}", upstream, ip_path);
    let config = Config::parse_from([
        "medilocator",
        "--places-api-key",
        API_KEY,
        "--places-base-url",
        upstream.as_str(),
        "--ip-geolocation-url",
        ip_url.as_str(),
        "--request-timeout-secs",
        "2",
    ]);
    let app_state = AppState::from_config(&config).expect("Failed to build app state");

    spawn(application(app_state, &config))
}

pub fn manual_query(extra: &str) -> String {
    format!("lat={}&lon={}{}", REFERENCE_LAT, REFERENCE_LNG, extra)
}
