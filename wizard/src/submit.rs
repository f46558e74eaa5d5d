//! [`Submission`] of a [`JobSpecification`] to the server.

use common::Handler;
use derive_more::{Display, Error, From};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use service::domain::{
    customer,
    job,
    job_type,
    specification::{Contact, CustomerRef, JobSpecification},
};
use tracerr::Traced;
use tracing as log;

/// Request to create a job out of a completed [`JobSpecification`].
#[derive(Clone, Debug)]
pub struct Submission {
    /// Completed [`JobSpecification`].
    pub specification: JobSpecification,

    /// ID of the [`job_type::JobType`] the job is created with.
    pub job_type_id: job_type::Id,
}

/// [`Handler`] submitting [`Submission`]s to the REST API of the server.
#[derive(Clone, Debug)]
pub struct HttpSubmitter {
    /// HTTP [`Client`] performing requests.
    client: Client,

    /// Base URL of the server, e.g. `http://127.0.0.1:8080`.
    base_url: String,
}

impl HttpSubmitter {
    /// Creates a new [`HttpSubmitter`] talking to the provided `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a new [`HttpSubmitter`] reusing the provided [`Client`].
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Posts the provided `body` as JSON to the `path` of the server.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Traced<SubmitError>> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> SubmitError))?;

        let status = resp.status();
        if !status.is_success() {
            let ApiError { code, message } = resp
                .json()
                .await
                .map_err(tracerr::from_and_wrap!(=> SubmitError))?;
            return Err(tracerr::new!(SubmitError::Rejected {
                status: status.as_u16(),
                code,
                message,
            }));
        }

        resp.json()
            .await
            .map_err(tracerr::from_and_wrap!(=> SubmitError))
    }

    /// Registers a new customer out of the provided [`Contact`].
    async fn create_customer(
        &self,
        contact: &Contact,
    ) -> Result<customer::Id, Traced<SubmitError>> {
        let Created { id } = self.post("customers", contact).await?;
        log::info!("customer `{id}` created");
        Ok(id)
    }
}

impl Handler<Submission> for HttpSubmitter {
    type Ok = job::Id;
    type Err = Traced<SubmitError>;

    async fn execute(
        &self,
        Submission {
            specification,
            job_type_id,
        }: Submission,
    ) -> Result<Self::Ok, Self::Err> {
        let customer_id = match &specification.customer {
            Some(CustomerRef::Existing(id)) => *id,
            Some(CustomerRef::Inline(contact)) => {
                self.create_customer(contact).await?
            }
            None => return Err(tracerr::new!(SubmitError::MissingCustomer)),
        };

        let body = JobBody {
            form_data: JobSpecification {
                customer: Some(CustomerRef::Existing(customer_id)),
                ..specification
            },
            job_id: job_type_id,
            customer_id,
        };
        let CreatedJob {
            job: Created { id },
        } = self.post("jobs", &body).await?;

        log::info!("job `{id}` submitted");
        Ok(id)
    }
}

/// Body of a `POST /jobs` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobBody {
    form_data: JobSpecification,
    job_id: job_type::Id,
    customer_id: customer::Id,
}

/// Anything created on the server, identified by its ID.
#[derive(Debug, Deserialize)]
struct Created<Id> {
    id: Id,
}

/// Response of a `POST /jobs` request.
#[derive(Debug, Deserialize)]
struct CreatedJob {
    job: Created<job::Id>,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

/// Error of submitting a [`Submission`].
#[derive(Debug, Display, Error, From)]
pub enum SubmitError {
    /// Request couldn't be performed or its response couldn't be read.
    #[display("HTTP request failed: {_0}")]
    #[from]
    Http(reqwest::Error),

    /// Server rejected the request.
    #[display("server rejected the request with `{code}` ({status}): \
               {message}")]
    Rejected {
        /// HTTP status code of the response.
        status: u16,

        /// Error code returned by the server.
        code: String,

        /// Human-readable error message returned by the server.
        message: String,
    },

    /// Specification references no customer.
    #[display("customer is not specified")]
    MissingCustomer,
}

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use common::Handler as _;
    use serde_json::{json, Value};
    use service::domain::{
        customer, job, job_type,
        specification::{Contact, CustomerRef, JobSpecification},
    };
    use tokio::net::TcpListener;

    use super::{HttpSubmitter, SubmitError, Submission};

    type Requests = Arc<Mutex<Vec<(&'static str, Value)>>>;

    async fn create_customer(
        State(requests): State<Requests>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        requests.lock().unwrap().push(("customers", body));
        (StatusCode::CREATED, Json(json!({"id": 9})))
    }

    async fn create_job(
        State(requests): State<Requests>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        requests.lock().unwrap().push(("jobs", body));
        (StatusCode::CREATED, Json(json!({"job": {"id": 42}})))
    }

    async fn fail_job(Json(_): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": "SUBSECTION_FAILED",
                "message": "Failed to store laminating of the job",
            })),
        )
    }

    /// Serves the provided [`Router`] on a random local port, returning its
    /// base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        }));
        format!("http://{addr}")
    }

    async fn recording_server() -> (HttpSubmitter, Requests) {
        let requests = Requests::default();
        let router = Router::new()
            .route("/customers", post(create_customer))
            .route("/jobs", post(create_job))
            .with_state(Arc::clone(&requests));
        (HttpSubmitter::new(serve(router).await), requests)
    }

    fn submission(customer: Option<CustomerRef>) -> Submission {
        Submission {
            specification: JobSpecification {
                customer,
                ..JobSpecification::default()
            },
            job_type_id: job_type::Id::from(2),
        }
    }

    #[tokio::test]
    async fn creates_inline_customer_before_job() {
        let (submitter, requests) = recording_server().await;
        let contact = Contact {
            name: customer::Name::new("Acme Traders").unwrap(),
            phone: None,
            email: None,
            address: None,
        };

        let id = submitter
            .execute(submission(Some(CustomerRef::Inline(contact))))
            .await
            .unwrap();

        assert_eq!(id, job::Id::from(42));
        let requests = requests.lock().unwrap();
        let paths: Vec<_> = requests.iter().map(|(path, _)| *path).collect();
        assert_eq!(paths, ["customers", "jobs"]);
        assert_eq!(requests[0].1["name"], "Acme Traders");

        let job = &requests[1].1;
        assert_eq!(job["formData"]["customer"], json!({"existing": 9}));
        assert_eq!(job["customerId"], 9);
        assert_eq!(job["jobId"], 2);
    }

    #[tokio::test]
    async fn submits_existing_customer_directly() {
        let (submitter, requests) = recording_server().await;

        let id = submitter
            .execute(submission(Some(CustomerRef::Existing(
                customer::Id::from(7),
            ))))
            .await
            .unwrap();

        assert_eq!(id, job::Id::from(42));
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (path, job) = &requests[0];
        assert_eq!(*path, "jobs");
        assert_eq!(job["formData"]["customer"], json!({"existing": 7}));
        assert_eq!(job["customerId"], 7);
    }

    #[tokio::test]
    async fn surfaces_server_rejection() {
        let router = Router::new().route("/jobs", post(fail_job));
        let submitter = HttpSubmitter::new(serve(router).await);

        let err = submitter
            .execute(submission(Some(CustomerRef::Existing(
                customer::Id::from(7),
            ))))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            SubmitError::Rejected { status: 500, code, message }
                if code == "SUBSECTION_FAILED"
                    && message == "Failed to store laminating of the job",
        ));
    }

    #[tokio::test]
    async fn requires_customer() {
        let submitter = HttpSubmitter::new("http://127.0.0.1:9");

        let err = submitter.execute(submission(None)).await.unwrap_err();

        assert!(matches!(err.as_ref(), SubmitError::MissingCustomer));
    }
}
