//! HTTP request handlers for the Carrier Quote Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::ENGINE_VERSION;
use crate::models::{QuoteOutcome, ShipmentRequest};

use super::request::QuoteRequest;
use super::response::{ApiError, ApiErrorResponse, HealthResponse, QuoteResponseBody};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(quote_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /quote endpoint.
///
/// Accepts a shipment description and returns carrier quotes, a rejection,
/// or the list of missing information.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let shipment = match ShipmentRequest::try_from(request) {
        Ok(shipment) => shipment,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid shipment");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let engine = match state.engine() {
        Ok(engine) => engine,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Reference tables unavailable");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let outcome = engine.quote(&shipment);
    let duration = start_time.elapsed();

    let outcome_kind = match &outcome {
        QuoteOutcome::Rejected { .. } => "rejected",
        QuoteOutcome::NeedsInfo { .. } => "needs_info",
        QuoteOutcome::Quoted(_) => "quoted",
    };
    info!(
        correlation_id = %correlation_id,
        destination = %shipment.country,
        outcome = outcome_kind,
        duration_us = duration.as_micros(),
        "Quote request completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(QuoteResponseBody::from(outcome)),
    )
        .into_response()
}

/// Handler for GET /health endpoint.
///
/// Loads the reference tables if needed and reports the carriers available.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.tables() {
        Ok(store) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                version: ENGINE_VERSION.to_string(),
                carriers: store.carriers().collect(),
            }),
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LazyTableStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(LazyTableStore::new("./config"))
    }

    async fn post_quote(state: AppState, body: &str) -> (StatusCode, Vec<u8>) {
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/quote")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_valid_request_returns_quotes() {
        let (status, body) = post_quote(
            create_test_state(),
            r#"{"content": "Books", "country": "Almanya", "weight": 5,
                "length": 40, "width": 40, "height": 50, "quantity": 2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: QuoteResponseBody = serde_json::from_slice(&body).unwrap();
        assert!(result.allowed);
        assert_eq!(result.quotes.unwrap().len(), 3);
        assert!(result.weight_summary.is_some());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_quote(create_test_state(), "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_wrong_field_type_returns_validation_error() {
        let (status, body) =
            post_quote(create_test_state(), r#"{"content": "x", "quantity": "two"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_zero_quantity_returns_400() {
        let (status, body) = post_quote(
            create_test_state(),
            r#"{"content": "Books", "country": "Germany", "weight": 2, "quantity": 0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_SHIPMENT");
    }

    #[tokio::test]
    async fn test_oversized_dimensions_return_400() {
        let (status, body) = post_quote(
            create_test_state(),
            r#"{"content": "Books", "country": "Germany", "weight": 1,
                "length": 1e10, "width": 1e10, "height": 1e10}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_SHIPMENT");
        assert!(error.message.contains("length"));
    }

    #[tokio::test]
    async fn test_missing_tables_return_500() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(LazyTableStore::new(dir.path()));
        let (status, body) = post_quote(
            state,
            r#"{"content": "Books", "country": "Germany", "weight": 2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_health_lists_carriers() {
        let response = create_router(create_test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.carriers.len(), 3);
    }
}
