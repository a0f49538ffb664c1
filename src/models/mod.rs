pub mod coordinate;
pub mod google_places;
pub mod place;
pub mod search;
