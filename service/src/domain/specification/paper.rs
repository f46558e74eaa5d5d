//! Paper-related parts of a [`JobSpecification`].
//!
//! [`JobSpecification`]: super::JobSpecification

use std::sync::LazyLock;

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

define_text! {
    #[doc = "Type of paper (stock name, weight, finish)."]
    PaperType(max = 128)
}

/// Which paper-related work the customer does on their own.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaperSupply {
    /// Indicator whether the customer supplies the paper.
    pub supplied_by_customer: bool,

    /// [`PaperType`] supplied by the customer.
    ///
    /// Required when [`PaperSupply::supplied_by_customer`] is set, ignored
    /// otherwise.
    pub supplied_paper_type: Option<PaperType>,

    /// Indicator whether the customer cuts the paper.
    pub cut_by_customer: bool,

    /// [`PaperType`] cut by the customer.
    ///
    /// Required when [`PaperSupply::cut_by_customer`] is set, ignored
    /// otherwise.
    pub cut_paper_type: Option<PaperType>,
}

impl PaperSupply {
    /// Drops the [`PaperType`]s whose gating flag is not set.
    #[must_use]
    pub fn normalize(self) -> Self {
        Self {
            supplied_paper_type: self
                .supplied_paper_type
                .filter(|_| self.supplied_by_customer),
            cut_paper_type: self.cut_paper_type.filter(|_| self.cut_by_customer),
            ..self
        }
    }
}

/// Paper consumed by a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaperItem {
    /// [`PaperType`] of this [`PaperItem`].
    pub paper_type: Option<PaperType>,

    /// Number of sheets.
    pub quantity: u32,

    /// [`CutSize`] of a sheet, if it's cut.
    pub cut_size: Option<CutSize>,

    /// Number of pieces cut out of a single sheet.
    pub cut_per_sheet: u32,
}

/// Size of a cut piece in `<width>x<height>` format (`12x18`, `8.5 X 11`).
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct CutSize(String);

impl CutSize {
    /// Creates a new [`CutSize`] if the given `size` matches the format.
    #[must_use]
    pub fn new(size: impl Into<String>) -> Option<Self> {
        /// Two positive decimal numbers separated by `x`, `X` or `×`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d+(\.\d+)?\s*[xX×]\s*\d+(\.\d+)?$")
                .expect("valid regex")
        });

        let size = size.into();
        REGEX.is_match(&size).then_some(Self(size))
    }
}

impl TryFrom<String> for CutSize {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `CutSize`")
    }
}

impl From<CutSize> for String {
    fn from(s: CutSize) -> Self {
        s.0
    }
}

#[cfg(test)]
mod spec {
    use super::{CutSize, PaperSupply, PaperType};

    #[test]
    fn validates_cut_size() {
        assert!(CutSize::new("12x18").is_some());
        assert!(CutSize::new("8.5 X 11").is_some());
        assert!(CutSize::new("20×30").is_some());
        assert!(CutSize::new("12 by 18").is_none());
        assert!(CutSize::new("x18").is_none());
    }

    #[test]
    fn normalization_ignores_disabled_paper_types() {
        let supply = PaperSupply {
            supplied_by_customer: false,
            supplied_paper_type: PaperType::new("Art card 300gsm"),
            cut_by_customer: true,
            cut_paper_type: PaperType::new("Maplitho 70gsm"),
        }
        .normalize();

        assert_eq!(supply.supplied_paper_type, None);
        assert_eq!(supply.cut_paper_type, PaperType::new("Maplitho 70gsm"));
    }
}
