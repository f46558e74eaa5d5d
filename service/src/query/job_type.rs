//! [`Query`] collection related to [`JobType`]s.

use common::operations::By;

use crate::domain::{job_type, JobType};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`JobType`] by its [`job_type::Id`].
pub type ById = DatabaseQuery<By<Option<JobType>, job_type::Id>>;

/// Queries all the [`JobType`]s offered by the shop.
pub type All = DatabaseQuery<By<Vec<JobType>, ()>>;
