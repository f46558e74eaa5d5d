//! [`Command`] definition.

pub mod create_customer;
pub mod create_job;
pub mod update_job_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_customer::CreateCustomer, create_job::CreateJob,
    update_job_status::UpdateJobStatus,
};
