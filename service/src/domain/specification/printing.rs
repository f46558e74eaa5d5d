//! [`PrintingMethod`] of a print job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

define_text! {
    #[doc = "Size of a printed sheet (`A4`, `23x36`)."]
    PaperSize(max = 64)
}

define_text! {
    #[doc = "Identifier of a printing machine or system."]
    PrintingSystem(max = 128)
}

/// Printing method of a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintingMethod {
    /// [`PaperSize`] being printed on.
    pub paper_size: Option<PaperSize>,

    /// Number of printed sheets.
    pub quantity: u32,

    /// [`PrintingSystem`] performing the print.
    pub printing_system: Option<PrintingSystem>,

    /// [`Impression`] count of the print.
    pub impression: Impression,
}

/// Impression count given by two factors (sheets and passes, for example).
///
/// The result is always derived from the factors and cannot be set directly.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Impression {
    /// First factor.
    pub first: Decimal,

    /// Second factor.
    pub second: Decimal,
}

impl Impression {
    /// Returns the product of both factors, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn result(&self) -> Decimal {
        self.checked_result().unwrap_or(Decimal::MAX)
    }

    /// Returns the product of both factors, or [`None`] if it overflows.
    #[must_use]
    pub fn checked_result(&self) -> Option<Decimal> {
        self.first.checked_mul(self.second)
    }
}
