//! [`JobType`]-related REST API handlers.

use axum::{Extension, Json};
use service::{domain::JobType, query, Query as _};

use crate::{AsError, Error, Service};

use super::SPAN_NAME;

/// Lists all the [`JobType`]s offered by the shop.
///
/// # Errors
///
/// If the [`JobType`]s cannot be read.
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<JobType>>, Error> {
    service
        .execute(query::job_type::All::by(()))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}
