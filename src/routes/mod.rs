//! Axum routers for local hosting of the handlers.

pub mod announcements;
pub mod common;

pub use announcements::announcement_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: common routes plus `/announcements`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(announcement_routes(state))
        .layer(TraceLayer::new_for_http())
}
