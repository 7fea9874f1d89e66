pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod observability;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::build_router;
pub use state::AppState;
