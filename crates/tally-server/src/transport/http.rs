//! `/inc` handler.
//!
//! Success answers `200` with `{"key": ..., "count": ...}`. Failures follow
//! the configured [`StoreErrorPolicy`]: `surface` maps the error's client code
//! to a status and a `{"code", "msg"}` body, `ignore` logs it and answers an
//! empty `200`.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::Instrument;

use tally_core::error::TallyError;

use crate::app_state::AppState;
use crate::config::StoreErrorPolicy;

fn error_json(err: &TallyError) -> serde_json::Value {
    json!({
        "code": err.client_code().as_str(),
        "msg": err.to_string(),
    })
}

/// Status for a failed counter step.
pub fn error_status(err: &TallyError) -> StatusCode {
    StatusCode::from_u16(err.client_code().http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn inc_handler(State(state): State<AppState>, method: Method) -> Response {
    let span = tracing::info_span!("inc", %method, key = %state.counter().key());

    async move {
        let counter = state.counter();
        match counter.increment().await {
            Ok(count) => {
                tracing::info!(count, "counter incremented");
                (
                    StatusCode::OK,
                    Json(json!({ "key": counter.key(), "count": count })),
                )
                    .into_response()
            }
            Err(err) => match state.store_error_policy() {
                StoreErrorPolicy::Surface => {
                    tracing::error!(error = %err, code = err.client_code().as_str(), "counter failed");
                    (error_status(&err), Json(error_json(&err))).into_response()
                }
                StoreErrorPolicy::Ignore => {
                    tracing::warn!(error = %err, "counter failed, ignored by policy");
                    StatusCode::OK.into_response()
                }
            },
        }
    }
    .instrument(span)
    .await
}
