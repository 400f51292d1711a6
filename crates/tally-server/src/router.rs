//! Axum router wiring.
//!
//! `/inc` accepts any method, matching how the counter has always been
//! reached. `/healthz` is for liveness probes.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/inc", any(transport::http::inc_handler))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
