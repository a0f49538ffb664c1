pub mod google_places_repo;
pub mod ip_geolocation_repo;
