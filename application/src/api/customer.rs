//! [`Customer`]-related REST API handlers.

use axum::{
    extract::rejection::JsonRejection, http::StatusCode, Extension, Json,
};
use service::{
    command,
    domain::{specification::Contact, Customer},
    Command as _,
};

use crate::{AsError, Error, Service};

use super::SPAN_NAME;

/// Creates a new [`Customer`] out of the provided [`Contact`].
///
/// Used by the wizard to register a new [`Customer`] before submitting a job
/// for them.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_BODY` - malformed or invalid [`Contact`].
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<Contact>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), Error> {
    let Json(contact) = body.map_err(AsError::into_error)?;

    let customer = service
        .execute(command::CreateCustomer::from(contact))
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(customer)))
}

impl AsError for command::create_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
