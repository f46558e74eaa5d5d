//! [`Job`]-related REST API handlers.
//!
//! [`Job`]: service::domain::Job

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::{
    command,
    domain::{customer, job, job_type, Job, JobSpecification},
    query, read, Command as _, Query as _,
};

use crate::{define_error, AsError, Error, Service};

use super::SPAN_NAME;

/// Body of a [`create`] request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    /// [`JobSpecification`] filled in the wizard.
    pub form_data: Option<JobSpecification>,

    /// ID of the [`job_type::JobType`] of the new [`Job`].
    pub job_id: Option<job_type::Id>,

    /// ID of the [`customer::Customer`] ordering the new [`Job`].
    pub customer_id: Option<customer::Id>,
}

impl CreateBody {
    /// Converts this [`CreateBody`] into a [`command::CreateJob`].
    ///
    /// # Errors
    ///
    /// With `MISSING_FIELD` code if any of the fields is missing.
    pub fn into_command(self) -> Result<command::CreateJob, Error> {
        let missing = |field| {
            Error::bad_request(
                "MISSING_FIELD",
                &format!("`{field}` is required"),
            )
        };

        Ok(command::CreateJob {
            specification: self.form_data.ok_or_else(|| missing("formData"))?,
            job_type_id: self.job_id.ok_or_else(|| missing("jobId"))?,
            customer_id: self
                .customer_id
                .ok_or_else(|| missing("customerId"))?,
        })
    }
}

/// Creates a new [`Job`] out of the submitted [`JobSpecification`].
///
/// # Errors
///
/// Possible error codes:
/// - `MISSING_FIELD` - `formData`, `jobId` or `customerId` is missing;
/// - `INVALID_SPECIFICATION` - provided [`JobSpecification`] is invalid;
/// - `CUSTOMER_NOT_FOUND` / `JOB_TYPE_NOT_FOUND` - referenced entity doesn't
///   exist;
/// - `SUBSECTION_FAILED` - storing a subsection failed, nothing is stored.
#[tracing::instrument(
    skip_all,
    fields(
        customer_id = ?body.as_ref().ok().and_then(|b| b.customer_id),
        job_type_id = ?body.as_ref().ok().and_then(|b| b.job_id),
        otel.name = SPAN_NAME,
    ),
)]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<read::job::Details>), Error> {
    let Json(body) = body.map_err(AsError::into_error)?;

    let details = service
        .execute(body.into_command()?)
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(details)))
}

/// Body of an [`update_status`] request.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct UpdateStatusBody {
    /// New [`job::Status`] of the [`Job`].
    pub status: job::Status,
}

/// Updates the [`job::Status`] of a [`Job`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_BODY` - provided status is not a known one;
/// - `JOB_NOT_FOUND` - [`Job`] doesn't exist.
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn update_status(
    Extension(service): Extension<Service>,
    id: Result<Path<job::Id>, PathRejection>,
    body: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<Json<Job>, Error> {
    let Path(job_id) = id.map_err(AsError::into_error)?;
    let Json(UpdateStatusBody { status }) =
        body.map_err(AsError::into_error)?;

    service
        .execute(command::UpdateJobStatus { job_id, status })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Returns a [`Job`] by its ID.
///
/// # Errors
///
/// Possible error codes:
/// - `JOB_NOT_FOUND` - [`Job`] doesn't exist.
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn get(
    Extension(service): Extension<Service>,
    id: Result<Path<job::Id>, PathRejection>,
) -> Result<Json<Job>, Error> {
    let Path(job_id) = id.map_err(AsError::into_error)?;

    service
        .execute(query::job::ById::by(job_id))
        .await
        .map_err(AsError::into_error)?
        .map(Json)
        .ok_or_else(|| NotFound::Job.into())
}

/// Query parameters of a [`list`] request.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ListParams {
    /// Maximum number of [`Job`]s to return.
    pub limit: Option<usize>,

    /// Number of [`Job`]s to skip.
    pub offset: Option<usize>,

    /// [`job::Status`] to filter [`Job`]s by.
    pub status: Option<job::Status>,

    /// ID of the [`customer::Customer`] to filter [`Job`]s by.
    pub customer_id: Option<customer::Id>,
}

/// Response of a [`list`] request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Listed [`Job`]s, the most recent first.
    pub items: Vec<Job>,

    /// Indicator whether more [`Job`]s follow.
    pub has_more: bool,

    /// Total count of [`Job`]s matching the filter.
    pub total_count: read::job::list::TotalCount,
}

/// Lists [`Job`]s, optionally filtered by status and customer.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_QUERY` - malformed query parameters;
/// - `INVALID_PAGINATION` - `limit` is out of range.
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn list(
    Extension(service): Extension<Service>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, Error> {
    let Query(ListParams {
        limit,
        offset,
        status,
        customer_id,
    }) = params.map_err(AsError::into_error)?;

    let arguments = read::job::list::Arguments::new(limit, offset)
        .ok_or_else(|| {
            Error::bad_request(
                "INVALID_PAGINATION",
                &format!(
                    "`limit` must be within `1..={}`",
                    read::job::list::Arguments::MAX_LIMIT,
                ),
            )
        })?;
    let filter = read::job::list::Filter {
        status,
        customer_id,
    };

    let page = service
        .execute(query::jobs::List::by(read::job::list::Selector {
            arguments,
            filter,
        }))
        .await
        .map_err(AsError::into_error)?;
    let total_count = service
        .execute(query::jobs::TotalCount::by(filter))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ListResponse {
        items: page.items,
        has_more: page.has_more,
        total_count,
    }))
}

define_error! {
    enum NotFound {
        #[code = "JOB_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Job` does not exist"]
        Job,
    }
}

impl AsError for command::create_job::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INLINE_CUSTOMER"]
                #[status = BAD_REQUEST]
                #[message = "New `Customer` must be created before the `Job`"]
                InlineCustomer,

                #[code = "CUSTOMER_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "Specification refers to another `Customer` than \
                             `customerId`"]
                CustomerMismatch,

                #[code = "CUSTOMER_NOT_FOUND"]
                #[status = NOT_FOUND]
                #[message = "`Customer` does not exist"]
                CustomerNotFound,

                #[code = "JOB_TYPE_NOT_FOUND"]
                #[status = NOT_FOUND]
                #[message = "`JobType` does not exist"]
                JobTypeNotFound,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Invalid(e) => Some(crate::Error::bad_request(
                "INVALID_SPECIFICATION",
                e,
            )),
            Self::InlineCustomer => Some(Error::InlineCustomer.into()),
            Self::CustomerMismatch { .. } => {
                Some(Error::CustomerMismatch.into())
            }
            Self::CustomerNotExists(_) => Some(Error::CustomerNotFound.into()),
            Self::JobTypeNotExists(_) => Some(Error::JobTypeNotFound.into()),
            Self::Subsection { subsection, .. } => Some(crate::Error {
                code: "SUBSECTION_FAILED",
                status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Failed to store {subsection} of the job"),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::update_job_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JobNotExists(_) => Some(NotFound::Job.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::{create_job, update_job_status},
        domain::{customer, job, job_type, JobSpecification},
        infra::{database, postgres},
    };

    use crate::AsError as _;

    use super::{CreateBody, UpdateStatusBody};

    fn body() -> CreateBody {
        CreateBody {
            form_data: Some(JobSpecification::default()),
            job_id: Some(job_type::Id::from(2)),
            customer_id: Some(customer::Id::from(7)),
        }
    }

    fn db_error() -> database::Error {
        database::Error::from(postgres::Error::from(
            postgres::connection::PoolError::Closed,
        ))
    }

    #[test]
    fn requires_every_field() {
        let cases = [
            (
                CreateBody {
                    form_data: None,
                    ..body()
                },
                "formData",
            ),
            (
                CreateBody {
                    job_id: None,
                    ..body()
                },
                "jobId",
            ),
            (
                CreateBody {
                    customer_id: None,
                    ..body()
                },
                "customerId",
            ),
        ];

        for (body, field) in cases {
            let err = body.into_command().unwrap_err();

            assert_eq!(err.code, "MISSING_FIELD");
            assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
            assert_eq!(err.message, format!("`{field}` is required"));
        }
    }

    #[test]
    fn converts_complete_body() {
        let cmd = body().into_command().unwrap();

        assert_eq!(cmd.job_type_id, job_type::Id::from(2));
        assert_eq!(cmd.customer_id, customer::Id::from(7));
    }

    #[test]
    fn maps_missing_entities_to_not_found() {
        let err = create_job::ExecutionError::CustomerNotExists(
            customer::Id::from(8),
        )
        .as_error();
        assert_eq!(err.code, "CUSTOMER_NOT_FOUND");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);

        let err = create_job::ExecutionError::JobTypeNotExists(
            job_type::Id::from(9),
        )
        .as_error();
        assert_eq!(err.code, "JOB_TYPE_NOT_FOUND");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);

        let err =
            update_job_status::ExecutionError::JobNotExists(job::Id::from(1))
                .as_error();
        assert_eq!(err.code, "JOB_NOT_FOUND");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn maps_customer_reference_errors_to_bad_request() {
        let err = create_job::ExecutionError::InlineCustomer.as_error();
        assert_eq!(err.code, "INLINE_CUSTOMER");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);

        let err = create_job::ExecutionError::CustomerMismatch {
            expected: customer::Id::from(7),
            actual: customer::Id::from(9),
        }
        .as_error();
        assert_eq!(err.code, "CUSTOMER_MISMATCH");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn maps_invalid_specification_to_bad_request() {
        let err = create_job::ExecutionError::Invalid(
            JobSpecification::default().validate().unwrap_err(),
        )
        .as_error();

        assert_eq!(err.code, "INVALID_SPECIFICATION");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn names_failed_subsection() {
        let err = create_job::ExecutionError::Subsection {
            subsection: job::Subsection::Laminating,
            source: db_error(),
        }
        .as_error();

        assert_eq!(err.code, "SUBSECTION_FAILED");
        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to store laminating of the job");
    }

    #[test]
    fn database_errors_are_internal() {
        let err = create_job::ExecutionError::Db(db_error()).as_error();

        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejects_unknown_status() {
        let body: UpdateStatusBody =
            serde_json::from_str(r#"{"status": "in_progress"}"#).unwrap();
        assert_eq!(body.status, job::Status::InProgress);

        assert!(serde_json::from_str::<UpdateStatusBody>(
            r#"{"status": "archived"}"#,
        )
        .is_err());
    }
}
