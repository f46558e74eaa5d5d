//! [`Step`] definitions.

use strum::{EnumCount, EnumIter, IntoEnumIterator as _};

/// Step of a [`Wizard`], in the order they're visited.
///
/// [`Wizard`]: crate::Wizard
#[derive(Clone, Copy, Debug, EnumCount, EnumIter, Eq, Hash, PartialEq)]
pub enum Step {
    /// Customer and top-level job information.
    CustomerInformation,

    /// Who supplies and cuts the paper.
    PaperSupply,

    /// Palette and custom colors.
    Colors,

    /// Paper items list.
    PaperItems,

    /// Printing method and its impressions.
    PrintingMethods,

    /// Laminating.
    Laminating,

    /// Die cut.
    DieCut,

    /// Bill book, its papers and binding.
    BillBooks,

    /// Delivery date.
    Calendar,

    /// Suppliers of materials.
    MaterialSupply,
}

impl Step {
    /// First [`Step`] of a wizard.
    pub const FIRST: Self = Self::CustomerInformation;

    /// Last [`Step`] of a wizard, followed by the summary.
    pub const LAST: Self = Self::MaterialSupply;

    /// Total number of [`Step`]s.
    pub const COUNT: usize = <Self as EnumCount>::COUNT;

    /// Zero-based position of this [`Step`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the [`Step`] at the provided `index`, clamping it into the
    /// valid range.
    #[must_use]
    pub fn at(index: usize) -> Self {
        Self::iter()
            .nth(index.min(Self::COUNT - 1))
            .unwrap_or(Self::LAST)
    }

    /// Returns the following [`Step`], staying on the [`Step::LAST`] one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::at(self.index() + 1)
    }

    /// Returns the preceding [`Step`], staying on the [`Step::FIRST`] one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::at(self.index().saturating_sub(1))
    }

    /// Indicates whether this [`Step`] may be skipped.
    #[must_use]
    pub fn is_skippable(self) -> bool {
        !matches!(self, Self::CustomerInformation | Self::Calendar)
    }

    /// Human-readable title of this [`Step`].
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::CustomerInformation => "Customer Information",
            Self::PaperSupply => "Paper Supply",
            Self::Colors => "Colors",
            Self::PaperItems => "Paper Items",
            Self::PrintingMethods => "Printing Methods",
            Self::Laminating => "Laminating",
            Self::DieCut => "Die Cut",
            Self::BillBooks => "Bill Books",
            Self::Calendar => "Calendar",
            Self::MaterialSupply => "Material Supply",
        }
    }
}
