//! REST API definitions.

pub mod customer;
pub mod estimate;
pub mod job;
pub mod job_type;

use axum::{
    routing::{get, patch, post},
    Router,
};

/// Builds the [`Router`] of all the REST API endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/customers", post(customer::create))
        .route("/estimates", post(estimate::create))
        .route("/jobs", get(job::list).post(job::create))
        .route("/jobs/:id", get(job::get))
        .route("/jobs/:id/status", patch(job::update_status))
        .route("/job-types", get(job_type::list))
}

/// Name of the [`tracing::Span`] of the REST API handlers.
const SPAN_NAME: &str = "REST request";
