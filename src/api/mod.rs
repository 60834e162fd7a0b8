pub mod envelope;
pub mod handlers;
pub mod routes;

pub use envelope::{ApiError, Callback};
pub use routes::create_stats_router;
