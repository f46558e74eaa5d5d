//! [`Job`] definitions.

pub mod row;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{customer, job_type, specification::PaperSupply};

pub use self::row::Subsection;

/// Print job persisted as the parent row of a decomposed
/// [`JobSpecification`].
///
/// [`JobSpecification`]: crate::domain::JobSpecification
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// ID of this [`Job`].
    pub id: Id,

    /// ID of the [`JobType`] of this [`Job`].
    ///
    /// [`JobType`]: crate::domain::JobType
    pub job_type_id: job_type::Id,

    /// ID of the [`Customer`] ordering this [`Job`].
    ///
    /// [`Customer`]: crate::domain::Customer
    pub customer_id: customer::Id,

    /// [`Number`] of this [`Job`].
    pub number: Number,

    /// [`Name`] of this [`Job`].
    pub name: Name,

    /// [`Quantity`] of this [`Job`].
    pub quantity: Quantity,

    /// [`DateTime`] when this [`Job`] should be delivered.
    pub delivery_date: DeliveryDateTime,

    /// [`Status`] of this [`Job`].
    pub status: Status,

    /// [`PaperSupply`] of this [`Job`].
    pub paper_supply: PaperSupply,

    /// [`DateTime`] when this [`Job`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    #[doc = "ID of a [`Job`]."]
    Id
}

define_text! {
    #[doc = "Shop-assigned number of a [`Job`]."]
    Number(max = 64)
}

define_text! {
    #[doc = "Human-readable name of a [`Job`]."]
    Name(max = 256)
}

/// Positive number of copies ordered in a [`Job`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "i32", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Creates a new [`Quantity`] if the provided `value` is positive.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }
}

impl TryFrom<i32> for Quantity {
    type Error = &'static str;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("`Quantity` must be positive")
    }
}

define_kind! {
    #[doc = "Production status of a [`Job`]."]
    enum Status {
        #[doc = "[`Job`] waits in the production queue."]
        Pending = 1,

        #[doc = "[`Job`] is being produced."]
        InProgress = 2,

        #[doc = "[`Job`] is produced and delivered."]
        Completed = 3,

        #[doc = "[`Job`] was cancelled."]
        Cancelled = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

/// [`DateTime`] when a [`Job`] should be delivered.
pub type DeliveryDateTime = DateTimeOf<(Job, unit::Delivery)>;

/// [`DateTime`] when a [`Job`] was created.
pub type CreationDateTime = DateTimeOf<(Job, unit::Creation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Quantity, Status};

    #[test]
    fn quantity_is_positive() {
        assert!(Quantity::new(1).is_some());
        assert!(Quantity::new(0).is_none());
        assert!(Quantity::new(-5).is_none());
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }

    #[test]
    fn parses_status() {
        assert_eq!(Status::from_str("in_progress").unwrap(), Status::InProgress);
        assert_eq!(
            serde_json::from_str::<Status>("\"cancelled\"").unwrap(),
            Status::Cancelled,
        );
        assert!(Status::from_str("archived").is_err());
        assert_eq!(Status::default(), Status::Pending);
    }
}
