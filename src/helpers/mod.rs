pub mod api_error;
pub mod api_query;
pub mod handler_404;
