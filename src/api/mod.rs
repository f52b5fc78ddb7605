//! HTTP API module for the Carrier Quote Engine.
//!
//! This module provides the REST API endpoints for quoting shipments
//! across carriers and checking that the reference tables are loaded.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BoxRequest, QuoteRequest};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, QuoteResponseBody, QuoteView};
pub use state::AppState;
