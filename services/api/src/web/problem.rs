//! services/api/src/web/problem.rs
//!
//! HTTP failures, rendered as `Problem` bodies.

use crate::contract::{Problem, ProblemError};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HttpError::BadRequest(_) => "badRequest",
            HttpError::Unauthorized(_) => "unauthorized",
        }
    }

    /// Builds the response body, tagged with a fresh correlation id.
    pub fn to_problem(&self) -> Problem {
        let status = self.status();
        Problem {
            problem_type: "about:blank".to_string(),
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            correlation_id: Some(Uuid::new_v4().to_string()),
            detail: self.to_string(),
            errors: vec![ProblemError {
                code: self.code().to_string(),
                detail: self.to_string(),
            }],
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let problem = self.to_problem();
        warn!(
            status = problem.status,
            correlation_id = problem.correlation_id.as_deref().unwrap_or_default(),
            "Request failed: {}",
            problem.detail
        );
        (self.status(), Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_carries_status_and_code() {
        let problem = HttpError::Unauthorized("Missing authorization header".to_string()).to_problem();
        assert_eq!(problem.status, 401);
        assert_eq!(problem.title, "Unauthorized");
        assert_eq!(problem.detail, "Missing authorization header");
        assert_eq!(problem.errors.len(), 1);
        assert_eq!(problem.errors[0].code, "unauthorized");
        assert!(problem.correlation_id.is_some());
    }

    #[test]
    fn test_correlation_ids_differ_per_problem() {
        let error = HttpError::BadRequest("size must be between 1 and 100".to_string());
        assert_ne!(error.to_problem().correlation_id, error.to_problem().correlation_id);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "badRequest");
    }
}
