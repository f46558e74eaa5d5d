//! [`JobSpecification`] definitions.

pub mod bill_book;
pub mod color;
pub mod decomposition;
pub mod die_cut;
pub mod laminating;
pub mod material;
mod normalized;
pub mod paper;
pub mod patch;
pub mod printing;

use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{customer, job};

pub use self::{
    bill_book::BillBook,
    color::{Color, Colors, CustomColor},
    decomposition::Decomposition,
    die_cut::DieCut,
    laminating::Laminating,
    material::{Material, MaterialSupply, Supplier},
    normalized::Normalized,
    paper::{PaperItem, PaperSupply, PaperType},
    patch::Patch,
    printing::{Impression, PrintingMethod},
};

/// Complete configuration of a single print job, edited step by step until
/// it's submitted.
///
/// Every subsection left as [`None`] is considered skipped and receives its
/// defaults on [normalization](JobSpecification::normalize).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobSpecification {
    /// [`CustomerRef`] ordering the job.
    pub customer: Option<CustomerRef>,

    /// [`job::Number`] of the job.
    pub job_number: Option<job::Number>,

    /// [`job::Name`] of the job.
    pub job_name: Option<job::Name>,

    /// [`job::Quantity`] of the job.
    pub quantity: Option<job::Quantity>,

    /// Date when the job should be delivered.
    pub delivery_date: Option<job::DeliveryDateTime>,

    /// [`PaperSupply`] of the job.
    pub paper_supply: Option<PaperSupply>,

    /// [`Colors`] of the job.
    pub colors: Option<Colors>,

    /// [`PaperItem`]s of the job, in display order.
    pub paper_items: Vec<PaperItem>,

    /// [`PrintingMethod`] of the job.
    pub printing_method: Option<PrintingMethod>,

    /// [`Laminating`] of the job.
    pub laminating: Option<Laminating>,

    /// [`DieCut`] of the job.
    pub die_cut: Option<DieCut>,

    /// [`BillBook`] of the job.
    pub bill_book: Option<BillBook>,

    /// [`MaterialSupply`] of the job.
    pub material_supply: Option<MaterialSupply>,
}

/// Reference to a customer of a [`JobSpecification`]: either an existing
/// [`Customer`], or the contact of a new one.
///
/// [`Customer`]: crate::domain::Customer
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerRef {
    /// Existing [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    Existing(customer::Id),

    /// [`Contact`] of a [`Customer`] to be created.
    ///
    /// [`Customer`]: crate::domain::Customer
    Inline(Contact),
}

/// Contact details of a new [`Customer`].
///
/// [`Customer`]: crate::domain::Customer
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// [`customer::Name`] of the new [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    pub name: customer::Name,

    /// [`customer::Phone`] of the new [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    #[serde(default)]
    pub phone: Option<customer::Phone>,

    /// [`customer::Email`] of the new [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    #[serde(default)]
    pub email: Option<customer::Email>,

    /// [`customer::Address`] of the new [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    #[serde(default)]
    pub address: Option<customer::Address>,
}

impl JobSpecification {
    /// Applies the provided [`Patch`] returning the updated
    /// [`JobSpecification`].
    #[must_use]
    pub fn with(self, patch: Patch) -> Self {
        patch.apply(self)
    }

    /// Checks this [`JobSpecification`] being ready for submission.
    ///
    /// Fields of disabled subsections are not checked.
    ///
    /// # Errors
    ///
    /// With the first found [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        use ValidationError as E;

        if self.customer.is_none() {
            return Err(E::MissingCustomer);
        }
        if self.job_number.is_none() {
            return Err(E::MissingField("jobNumber"));
        }
        if self.job_name.is_none() {
            return Err(E::MissingField("jobName"));
        }
        if self.quantity.is_none() {
            return Err(E::MissingField("quantity"));
        }
        if self.delivery_date.is_none() {
            return Err(E::MissingField("deliveryDate"));
        }

        if let Some(supply) = &self.paper_supply {
            if supply.supplied_by_customer
                && supply.supplied_paper_type.is_none()
            {
                return Err(E::MissingField("paperSupply.suppliedPaperType"));
            }
            if supply.cut_by_customer && supply.cut_paper_type.is_none() {
                return Err(E::MissingField("paperSupply.cutPaperType"));
            }
        }

        for (i, item) in self.paper_items.iter().enumerate() {
            if item.paper_type.is_none() {
                return Err(E::MissingPaperItemType(i));
            }
        }

        if let Some(printing) = &self.printing_method {
            check_non_negative("printingMethod.impression", [
                printing.impression.first,
                printing.impression.second,
            ])?;
            check_bounded(
                "printingMethod.impression",
                printing.impression.checked_result(),
            )?;
        }

        if let Some(lam) = &self.laminating {
            check_non_negative("laminating", [
                lam.height,
                lam.width,
                lam.unit_price,
            ])?;
            check_bounded("laminating", lam.checked_result())?;
        }

        if let Some(die_cut) = &self.die_cut {
            check_non_negative("dieCut.impression", [
                die_cut.impression.first,
                die_cut.impression.second,
                die_cut.manual_result.unwrap_or_default(),
            ])?;
            check_bounded("dieCut.impression", die_cut.checked_result())?;
        }

        if let Some(book) = &self.bill_book {
            if book.number_of_papers > BillBook::MAX_PAPERS {
                return Err(E::TooManyPapers(book.number_of_papers));
            }
            if !book.is_consistent() {
                return Err(E::PaperCountMismatch {
                    expected: book.number_of_papers,
                    actual: book.papers.len(),
                });
            }
            check_non_negative("billBook.details.unitPrice", [
                book.details.unit_price,
            ])?;
            check_bounded("billBook.details", book.details.checked_result())?;
        }

        if let Some(supply) = &self.material_supply {
            if let Some((material, _)) = supply
                .0
                .iter()
                .find(|(_, s)| matches!(s, Supplier::Shop(None)))
            {
                return Err(E::MissingSupplierName(*material));
            }
        }

        Ok(())
    }

    /// Validates this [`JobSpecification`] and replaces every skipped
    /// subsection with its defaults.
    ///
    /// # Errors
    ///
    /// If this [`JobSpecification`] is not [valid](Self::validate).
    pub fn normalize(self) -> Result<Normalized, ValidationError> {
        self.validate()?;
        Normalized::try_from(self)
    }
}

/// Checks all the provided `values` being non-negative.
fn check_non_negative<const N: usize>(
    field: &'static str,
    values: [Decimal; N],
) -> Result<(), ValidationError> {
    if values.iter().any(Decimal::is_sign_negative) {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

/// Checks the provided derived `result` not overflowing.
fn check_bounded(
    field: &'static str,
    result: Option<Decimal>,
) -> Result<(), ValidationError> {
    result.map(drop).ok_or(ValidationError::TooLarge(field))
}

/// Error of a [`JobSpecification`] not being ready for submission.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// Neither an existing customer nor a contact is specified.
    #[display("customer is not specified")]
    MissingCustomer,

    /// Required field is missing.
    #[display("`{_0}` is required")]
    MissingField(#[error(not(source))] &'static str),

    /// [`PaperItem`] has no [`PaperType`].
    #[display("`paperItems[{_0}].paperType` is required")]
    MissingPaperItemType(#[error(not(source))] usize),

    /// Papers of a [`BillBook`] don't match their declared number.
    #[display("bill book declares {expected} papers, but has {actual}")]
    PaperCountMismatch {
        /// Declared number of papers.
        expected: u32,

        /// Actual number of papers.
        actual: usize,
    },

    /// [`Supplier::Shop`] has no name.
    #[display("supplier name of `{_0}` is required")]
    MissingSupplierName(#[error(not(source))] Material),

    /// Amount must not be negative.
    #[display("`{_0}` must not be negative")]
    Negative(#[error(not(source))] &'static str),

    /// Derived result of the amounts doesn't fit into a [`Decimal`].
    #[display("`{_0}` is too large")]
    TooLarge(#[error(not(source))] &'static str),

    /// [`BillBook`] declares more than [`BillBook::MAX_PAPERS`] papers.
    #[display("bill book declares too many papers: {_0}")]
    TooManyPapers(#[error(not(source))] u32),
}
