//! services/api/src/web/middleware.rs
//!
//! Authorization middleware for the signal routes.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

use crate::web::problem::HttpError;

/// Rejects requests that carry no `Authorization` header with a 401 Problem.
///
/// Only the presence of the header is checked; the token itself is not
/// verified here.
pub async fn require_authorization(req: Request, next: Next) -> Result<Response, HttpError> {
    let present = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty());

    if !present {
        return Err(HttpError::Unauthorized(
            "Missing authorization header".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
