//! [`BillBook`] of a print job.

use std::collections::BTreeSet;

use common::define_kind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Color, PaperType};

define_text! {
    #[doc = "Range of numbers printed on bills or books (`1-5000`)."]
    Numbering(max = 64)
}

define_kind! {
    #[doc = "Binding of a bill book."]
    enum BindingKind {
        #[doc = "Glued along the top edge."]
        TopGlue = 1,

        #[doc = "Stitched along the side."]
        SideStitch = 2,

        #[doc = "Stitched through the fold."]
        CenterStitch = 3,

        #[doc = "Glued square spine."]
        Perfect = 4,

        #[doc = "Spiral wire binding."]
        Spiral = 5,
    }
}

impl BindingKind {
    /// Returns path to the template image previewing this [`BindingKind`].
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::TopGlue => "templates/binding/top_glue.png",
            Self::SideStitch => "templates/binding/side_stitch.png",
            Self::CenterStitch => "templates/binding/center_stitch.png",
            Self::Perfect => "templates/binding/perfect.png",
            Self::Spiral => "templates/binding/spiral.png",
        }
    }
}

/// Bill book (a pad of numbered multi-part bills) of a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillBook {
    /// Number of [`Paper`]s every bill consists of.
    pub number_of_papers: u32,

    /// [`Paper`]s of every bill, in their order within a bill.
    pub papers: Vec<Paper>,

    /// [`Details`] of this [`BillBook`].
    pub details: Details,

    /// Indicator whether bills are gathered into sets.
    pub gathering: bool,

    /// [`BindingKind`] of this [`BillBook`], if it's bound.
    pub binding: Option<BindingKind>,
}

impl BillBook {
    /// Maximum number of [`Paper`]s a single bill may consist of.
    pub const MAX_PAPERS: u32 = 10;

    /// Sets the number of [`Paper`]s to the provided one (clamped to
    /// [`BillBook::MAX_PAPERS`]), truncating the extra [`Paper`]s or padding
    /// with default ones.
    ///
    /// Existing [`Paper`]s keep their positions.
    #[must_use]
    pub fn with_number_of_papers(mut self, count: u32) -> Self {
        let count = count.min(Self::MAX_PAPERS);
        self.number_of_papers = count;
        self.papers.resize_with(
            usize::try_from(count).unwrap_or_default(),
            Paper::default,
        );
        self
    }

    /// Indicates whether [`BillBook::papers`] match
    /// [`BillBook::number_of_papers`].
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        usize::try_from(self.number_of_papers)
            .is_ok_and(|n| n == self.papers.len())
    }
}

/// Single paper of a multi-part bill.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paper {
    /// [`PaperType`] of this [`Paper`].
    pub paper_type: Option<PaperType>,

    /// [`Color`]s printed on this [`Paper`].
    pub colors: BTreeSet<Color>,
}

/// Numbering and pricing details of a [`BillBook`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Details {
    /// [`Numbering`] of bills.
    pub bill_numbers: Option<Numbering>,

    /// [`Numbering`] of books.
    pub book_numbers: Option<Numbering>,

    /// Number of bill sets in a book.
    pub set_count: u32,

    /// Number of books.
    pub quantity: u32,

    /// Price of a single book.
    pub unit_price: Decimal,
}

impl Details {
    /// Returns the total price of the books, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn result(&self) -> Decimal {
        self.checked_result().unwrap_or(Decimal::MAX)
    }

    /// Returns the total price of the books, or [`None`] if it overflows.
    #[must_use]
    pub fn checked_result(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use super::{BillBook, Color, Paper, PaperType};

    fn paper(name: &str) -> Paper {
        Paper {
            paper_type: PaperType::new(name),
            colors: BTreeSet::from([Color::Black]),
        }
    }

    #[test]
    fn padding_preserves_existing_papers() {
        let book = BillBook {
            number_of_papers: 2,
            papers: vec![paper("White"), paper("Pink")],
            ..BillBook::default()
        }
        .with_number_of_papers(4);

        assert_eq!(book.number_of_papers, 4);
        assert_eq!(book.papers.len(), 4);
        assert_eq!(book.papers[0], paper("White"));
        assert_eq!(book.papers[1], paper("Pink"));
        assert_eq!(book.papers[2], Paper::default());
        assert_eq!(book.papers[3], Paper::default());
        assert!(book.is_consistent());
    }

    #[test]
    fn truncation_preserves_leading_papers() {
        let book = BillBook::default()
            .with_number_of_papers(3)
            .with_number_of_papers(1);
        assert_eq!(book.papers, [Paper::default()]);

        let book = BillBook {
            number_of_papers: 3,
            papers: vec![paper("White"), paper("Pink"), paper("Yellow")],
            ..BillBook::default()
        }
        .with_number_of_papers(2);
        assert_eq!(book.papers, [paper("White"), paper("Pink")]);

        let book = book.with_number_of_papers(0);
        assert!(book.papers.is_empty());
        assert!(book.is_consistent());
    }

    #[test]
    fn clamps_number_of_papers() {
        let book = BillBook::default().with_number_of_papers(u32::MAX);

        assert_eq!(book.number_of_papers, BillBook::MAX_PAPERS);
        assert_eq!(book.papers.len(), 10);
        assert!(book.is_consistent());
    }

    #[test]
    fn detects_inconsistency() {
        let book = BillBook {
            number_of_papers: 3,
            papers: vec![paper("White")],
            ..BillBook::default()
        };

        assert!(!book.is_consistent());
    }

    #[test]
    fn every_binding_has_template() {
        for kind in super::BindingKind::all() {
            assert!(kind.template().ends_with(".png"));
        }
    }
}
