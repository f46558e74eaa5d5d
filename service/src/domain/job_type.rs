//! [`JobType`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

/// Type of print jobs offered by the shop, priced by its [`Family`] formula.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JobType {
    /// ID of this [`JobType`].
    pub id: Id,

    /// [`Name`] of this [`JobType`].
    pub name: Name,

    /// [`Family`] of this [`JobType`].
    pub family: Family,
}

define_id! {
    #[doc = "ID of a [`JobType`]."]
    Id
}

define_text! {
    #[doc = "Human-readable name of a [`JobType`]."]
    Name(max = 128)
}

define_kind! {
    #[doc = "Pricing family of a [`JobType`]."]
    enum Family {
        #[doc = "Large-format digital print, priced by area."]
        Digital = 1,

        #[doc = "Offset print, priced by a cost-plus model."]
        Offset = 2,

        #[doc = "Sublimation print, priced by base, material and setup costs."]
        Sublimation = 3,

        #[doc = "Any other job, priced by a flat rate per area."]
        Other = 4,
    }
}

impl Family {
    /// Parses a [`Family`] out of the provided `name`, ignoring its case and
    /// surrounding whitespace.
    ///
    /// Unknown names resolve to [`Family::Other`], so newly configured job
    /// types still receive an approximate price.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        name.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(Self::Other)
    }
}
