//! Price estimation REST API handlers.

use axum::{extract::rejection::JsonRejection, Extension, Json};
use common::{operations::Estimate, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    domain::job_type::Family,
    pricing::{Geometry, Input, Options},
    Query as _,
};

use crate::{AsError, Error, Service};

use super::SPAN_NAME;

/// Body of a [`create`] request.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBody {
    /// Name of the [`Family`] of the priced job.
    pub job_type: String,

    /// Width of a printed piece (in inches).
    pub width: Decimal,

    /// Height of a printed piece (in inches).
    pub height: Decimal,

    /// Number of printed pieces.
    pub quantity: u32,

    /// Number of rings (eyelets) of a digital print.
    #[serde(default)]
    pub ring_count: u32,

    /// Pole mounting of a digital print.
    #[serde(default)]
    pub pole_mounting: bool,

    /// Number of plates of an offset print.
    #[serde(default)]
    pub plate_count: u32,

    /// Double-sided offset print.
    #[serde(default)]
    pub double_sided: bool,

    /// Machine setup time of an offset print (in hours).
    #[serde(default)]
    pub setup_time_hours: Decimal,
}

impl From<EstimateBody> for Input {
    fn from(body: EstimateBody) -> Self {
        let EstimateBody {
            job_type,
            width,
            height,
            quantity,
            ring_count,
            pole_mounting,
            plate_count,
            double_sided,
            setup_time_hours,
        } = body;

        Self::new(
            Family::parse(&job_type),
            Geometry {
                width,
                height,
                quantity,
            },
            Options {
                ring_count,
                pole_mounting,
                plate_count,
                double_sided,
                setup_time_hours,
            },
        )
    }
}

/// Response of a [`create`] request.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EstimateResponse {
    /// Estimated price.
    pub price: Money,
}

/// Estimates a price of a job.
///
/// Invalid geometry estimates to a zero price rather than an error.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_BODY` - malformed request body.
#[tracing::instrument(skip_all, fields(otel.name = SPAN_NAME))]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<EstimateBody>, JsonRejection>,
) -> Result<Json<EstimateResponse>, Error> {
    let Json(body) = body.map_err(AsError::into_error)?;

    let price = service
        .execute(Estimate(Input::from(body)))
        .await
        .unwrap_or_else(|e| match e {});

    Ok(Json(EstimateResponse { price }))
}

#[cfg(test)]
mod spec {
    use service::pricing::Input;

    use super::EstimateBody;

    #[test]
    fn picks_options_of_family() {
        let body: EstimateBody = serde_json::from_str(
            r#"{
                "jobType": " Digital ",
                "width": 24,
                "height": "36",
                "quantity": 1,
                "ringCount": 4,
                "plateCount": 3
            }"#,
        )
        .unwrap();

        assert!(matches!(
            Input::from(body),
            Input::Digital {
                ring_count: 4,
                pole_mounting: false,
                ..
            },
        ));
    }

    #[test]
    fn unknown_job_type_is_priced_as_other() {
        let body: EstimateBody = serde_json::from_str(
            r#"{"jobType": "Embroidery", "width": 1, "height": 1, "quantity": 1}"#,
        )
        .unwrap();

        assert!(matches!(Input::from(body), Input::Other { .. }));
    }
}
