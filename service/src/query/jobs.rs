//! [`Query`] collection related to the multiple [`Job`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Job, Query};
use crate::read::job::list;

use super::DatabaseQuery;

/// Queries a list of [`Job`]s.
pub type List = DatabaseQuery<By<list::Page, list::Selector>>;

/// Queries total count of [`Job`]s matching a [`list::Filter`].
pub type TotalCount = DatabaseQuery<By<list::TotalCount, list::Filter>>;
