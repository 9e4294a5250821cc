//! services/api/src/web/rest.rs
//!
//! Axum handlers for the REST endpoints of the contract. Signals are not
//! stored: pushes are acknowledged and pulls come back empty.

use crate::contract::{EserviceParams, PullQuery, Signal, SignalPullResponse, SignalPushResponse};
use crate::web::problem::HttpError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::Json,
};
use std::collections::HashMap;
use tracing::info;

/// `GET /status`
pub async fn status_handler() -> Json<&'static str> {
    Json("OK")
}

/// `POST /signals`
pub async fn push_signal_handler(
    payload: Result<Json<Signal>, JsonRejection>,
) -> Result<Json<SignalPushResponse>, HttpError> {
    let Json(signal) = payload?;
    info!(
        signal_id = signal.signal_id,
        eservice_id = %signal.eservice_id,
        signal_type = ?signal.signal_type,
        "Signal pushed"
    );
    Ok(Json(SignalPushResponse {
        signal_id: signal.signal_id,
    }))
}

/// `GET /signals/{eserviceId}`
pub async fn pull_signals_handler(
    Path(params): Path<EserviceParams>,
    query: Result<Query<PullQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<SignalPullResponse>), HttpError> {
    let Query(query) = query?;
    query.validate().map_err(HttpError::BadRequest)?;
    info!(
        eservice_id = %params.eservice_id,
        signal_id = query.signal_id,
        size = query.size,
        "Signals pulled"
    );
    let response = SignalPullResponse {
        signals: Vec::new(),
        last_signal_id: None,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// `GET /test` echoes its query string back as a JSON object.
pub async fn echo_query_handler(
    Query(params): Query<HashMap<String, String>>,
) -> Json<HashMap<String, String>> {
    Json(params)
}
