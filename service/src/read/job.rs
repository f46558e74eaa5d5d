//! [`Job`]-related read definitions.

use serde::Serialize;

use crate::domain::{specification::Normalized, Customer, Job, JobType};

/// [`Job`] hydrated with everything it references.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    /// [`Job`] itself.
    pub job: Job,

    /// [`JobType`] of the [`Job`].
    pub job_type: JobType,

    /// [`Customer`] ordering the [`Job`].
    pub customer: Customer,

    /// [`Normalized`] specification the [`Job`] was created from.
    pub specification: Normalized,
}

pub mod list {
    //! [`Job`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};
    use serde::Serialize;

    use crate::domain::{customer, job};
    #[cfg(doc)]
    use crate::domain::{Customer, Job};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = job::Job;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`job::Status`] to list [`Job`]s with.
        pub status: Option<job::Status>,

        /// ID of the [`Customer`] to list [`Job`]s of.
        pub customer_id: Option<customer::Id>,
    }

    /// Total count of [`Job`] list items.
    #[derive(
        Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq, Serialize,
    )]
    #[serde(transparent)]
    pub struct TotalCount(i64);
}
