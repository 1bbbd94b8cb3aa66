//! HTTP API module: routes, handlers, and cross-origin policy.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::ApiJson;
pub use handlers::AppState;
pub use routes::create_router;
