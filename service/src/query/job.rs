//! [`Query`] collection related to a single [`Job`].

use common::operations::By;

use crate::domain::{job, Job};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Job`] by its [`job::Id`].
pub type ById = DatabaseQuery<By<Option<Job>, job::Id>>;
