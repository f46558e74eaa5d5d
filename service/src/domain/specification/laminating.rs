//! [`Laminating`] of a print job.

use common::define_kind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

define_kind! {
    #[doc = "Kind of a laminating film."]
    enum Kind {
        #[doc = "Glossy film."]
        Glossy = 1,

        #[doc = "Matte film."]
        Matte = 2,

        #[doc = "No film applied."]
        None = 3,
    }
}

impl Default for Kind {
    fn default() -> Self {
        Self::None
    }
}

/// Laminating of a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Laminating {
    /// [`Kind`] of the film.
    pub kind: Kind,

    /// Height of a laminated sheet.
    pub height: Decimal,

    /// Width of a laminated sheet.
    pub width: Decimal,

    /// Number of laminated sheets.
    pub quantity: u32,

    /// Price of laminating a single sheet.
    pub unit_price: Decimal,
}

impl Laminating {
    /// Returns the total price of this [`Laminating`], saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn result(&self) -> Decimal {
        self.checked_result().unwrap_or(Decimal::MAX)
    }

    /// Returns the total price of this [`Laminating`], or [`None`] if it
    /// overflows.
    #[must_use]
    pub fn checked_result(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}
