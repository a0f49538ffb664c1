pub mod distance;
pub mod location_resolver;
pub mod ranker;
pub mod search_pipeline;
