//! [`Normalized`] job specification.

use serde::{Deserialize, Serialize};

use crate::domain::job;

use super::{
    BillBook, Colors, CustomerRef, DieCut, JobSpecification, Laminating,
    MaterialSupply, PaperItem, PaperSupply, PrintingMethod, ValidationError,
};

/// [`JobSpecification`] with every required field present and every skipped
/// subsection replaced with its defaults.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    /// [`CustomerRef`] ordering the job.
    pub customer: CustomerRef,

    /// [`job::Number`] of the job.
    pub job_number: job::Number,

    /// [`job::Name`] of the job.
    pub job_name: job::Name,

    /// [`job::Quantity`] of the job.
    pub quantity: job::Quantity,

    /// Date when the job should be delivered.
    pub delivery_date: job::DeliveryDateTime,

    /// [`PaperSupply`] without the paper types of disabled flags.
    pub paper_supply: PaperSupply,

    /// [`Colors`] of the job.
    pub colors: Colors,

    /// [`PaperItem`]s of the job.
    pub paper_items: Vec<PaperItem>,

    /// [`PrintingMethod`] of the job.
    pub printing_method: PrintingMethod,

    /// [`Laminating`] of the job.
    pub laminating: Laminating,

    /// [`DieCut`] of the job.
    pub die_cut: DieCut,

    /// [`BillBook`] of the job.
    pub bill_book: BillBook,

    /// [`MaterialSupply`] listing every [`Material`].
    ///
    /// [`Material`]: super::Material
    pub material_supply: MaterialSupply,
}

impl TryFrom<JobSpecification> for Normalized {
    type Error = ValidationError;

    fn try_from(spec: JobSpecification) -> Result<Self, Self::Error> {
        use ValidationError as E;

        let JobSpecification {
            customer,
            job_number,
            job_name,
            quantity,
            delivery_date,
            paper_supply,
            colors,
            paper_items,
            printing_method,
            laminating,
            die_cut,
            bill_book,
            material_supply,
        } = spec;

        Ok(Self {
            customer: customer.ok_or(E::MissingCustomer)?,
            job_number: job_number.ok_or(E::MissingField("jobNumber"))?,
            job_name: job_name.ok_or(E::MissingField("jobName"))?,
            quantity: quantity.ok_or(E::MissingField("quantity"))?,
            delivery_date: delivery_date
                .ok_or(E::MissingField("deliveryDate"))?,
            paper_supply: paper_supply.unwrap_or_default().normalize(),
            colors: colors.unwrap_or_default(),
            paper_items,
            printing_method: printing_method.unwrap_or_default(),
            laminating: laminating.unwrap_or_default(),
            die_cut: die_cut.unwrap_or_default(),
            bill_book: bill_book.unwrap_or_default(),
            material_supply: MaterialSupply(
                material_supply.unwrap_or_default().complete().collect(),
            ),
        })
    }
}
