//! Rows a [`Job`] is decomposed into.
//!
//! [`Job`]: super::Job

use derive_more::Display;
use rust_decimal::Decimal;

use crate::domain::{
    customer, job_type,
    specification::{
        bill_book::{BindingKind, Numbering},
        die_cut, laminating,
        material::SupplierName,
        paper::CutSize,
        printing::{PaperSize, PrintingSystem},
        Color as PaletteColor, CustomColor, Material, PaperSupply, PaperType,
    },
};

use super::{
    CreationDateTime, DeliveryDateTime, Id, Name, Number, Quantity, Status,
};

/// Subsection of a [`Job`] stored in its own rows.
///
/// [`Job`]: super::Job
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Subsection {
    /// [`Color`] rows.
    #[display("colors")]
    Colors,

    /// [`PaperItem`] rows.
    #[display("paper items")]
    PaperItems,

    /// [`PrintingMethod`] row.
    #[display("printing method")]
    PrintingMethod,

    /// [`Laminating`] row.
    #[display("laminating")]
    Laminating,

    /// [`DieCut`] row.
    #[display("die cut")]
    DieCut,

    /// [`BillBook`] row with its [`BillBookPaper`] and [`BillBookPaperColor`]
    /// rows.
    #[display("bill book")]
    BillBook,

    /// [`MaterialSupply`] row with its [`MaterialSupplyItem`] rows.
    #[display("material supply")]
    MaterialSupply,
}

/// Parent row of a new [`Job`].
///
/// [`Job`]: super::Job
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewJob {
    /// ID of the [`JobType`](crate::domain::JobType).
    pub job_type_id: job_type::Id,

    /// ID of the [`Customer`](crate::domain::Customer).
    pub customer_id: customer::Id,

    /// [`Number`] of the [`Job`](super::Job).
    pub number: Number,

    /// [`Name`] of the [`Job`](super::Job).
    pub name: Name,

    /// [`Quantity`] of the [`Job`](super::Job).
    pub quantity: Quantity,

    /// Delivery date of the [`Job`](super::Job).
    pub delivery_date: DeliveryDateTime,

    /// Initial [`Status`].
    pub status: Status,

    /// [`PaperSupply`] stored in the parent row.
    pub paper_supply: PaperSupply,

    /// Creation date of the [`Job`](super::Job).
    pub created_at: CreationDateTime,
}

/// Value of a [`Color`] row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColorValue {
    /// Color of the palette.
    Palette(PaletteColor),

    /// Free-text custom color.
    Custom(CustomColor),
}

/// Row of a selected color.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Color {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// [`ColorValue`] of this row.
    pub value: ColorValue,
}

/// Row of a paper item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaperItem {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// Display position.
    pub position: i32,

    /// [`PaperType`] of the item.
    pub paper_type: Option<PaperType>,

    /// Number of sheets.
    pub quantity: i64,

    /// [`CutSize`] of a sheet.
    pub cut_size: Option<CutSize>,

    /// Number of pieces cut out of a sheet.
    pub cut_per_sheet: i64,
}

/// Row of a printing method.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrintingMethod {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// [`PaperSize`] being printed on.
    pub paper_size: Option<PaperSize>,

    /// Number of printed sheets.
    pub quantity: i64,

    /// [`PrintingSystem`] performing the print.
    pub printing_system: Option<PrintingSystem>,

    /// First impression factor.
    pub impression_first: Decimal,

    /// Second impression factor.
    pub impression_second: Decimal,

    /// Derived impression result.
    pub impression_result: Decimal,
}

/// Row of a laminating.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Laminating {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// [`laminating::Kind`] of the film.
    pub kind: laminating::Kind,

    /// Height of a sheet.
    pub height: Decimal,

    /// Width of a sheet.
    pub width: Decimal,

    /// Number of sheets.
    pub quantity: i64,

    /// Price of a sheet.
    pub unit_price: Decimal,

    /// Derived total price.
    pub result: Decimal,
}

/// Row of a die cut.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DieCut {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// Selected [`die_cut::Operation`]s in their declaration order.
    pub operations: Vec<die_cut::Operation>,

    /// First impression factor.
    pub impression_first: Decimal,

    /// Second impression factor.
    pub impression_second: Decimal,

    /// Impression result, either derived or entered manually.
    pub impression_result: Decimal,

    /// Indicator whether [`DieCut::impression_result`] was entered manually.
    pub manual_result: bool,
}

/// ID of a [`BillBook`] row.
pub type BillBookId = i64;

/// Row of a bill book.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillBook {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,

    /// Number of papers in a bill.
    pub number_of_papers: i64,

    /// [`Numbering`] of bills.
    pub bill_numbers: Option<Numbering>,

    /// [`Numbering`] of books.
    pub book_numbers: Option<Numbering>,

    /// Number of bill sets in a book.
    pub set_count: i64,

    /// Number of books.
    pub quantity: i64,

    /// Price of a book.
    pub unit_price: Decimal,

    /// Derived total price.
    pub result: Decimal,

    /// Indicator whether bills are gathered.
    pub gathering: bool,

    /// [`BindingKind`], if bound.
    pub binding: Option<BindingKind>,
}

/// ID of a [`BillBookPaper`] row.
pub type BillBookPaperId = i64;

/// Row of a single paper of a bill.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillBookPaper {
    /// ID of the parent [`BillBook`] row.
    pub bill_book_id: BillBookId,

    /// Position of the paper within a bill.
    pub position: i32,

    /// [`PaperType`] of the paper.
    pub paper_type: Option<PaperType>,
}

/// Row of a color printed on a [`BillBookPaper`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillBookPaperColor {
    /// ID of the parent [`BillBookPaper`] row.
    pub paper_id: BillBookPaperId,

    /// Printed color.
    pub color: PaletteColor,
}

/// ID of a [`MaterialSupply`] row.
pub type MaterialSupplyId = i64;

/// Row of a material supply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MaterialSupply {
    /// ID of the parent [`Job`](super::Job).
    pub job_id: Id,
}

/// Row of a supplier of a single [`Material`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaterialSupplyItem {
    /// ID of the parent [`MaterialSupply`] row.
    pub material_supply_id: MaterialSupplyId,

    /// Supplied [`Material`].
    pub material: Material,

    /// Indicator whether the shop orders the [`Material`] from a supplier.
    pub supplied_by_shop: bool,

    /// [`SupplierName`], if supplied by the shop.
    pub supplier_name: Option<SupplierName>,
}
