//! [`RateCard`] definitions.

use common::Percent;
use rust_decimal::Decimal;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Unit prices and fees of every pricing [`Family`].
///
/// [`Family`]: crate::domain::job_type::Family
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct RateCard {
    /// [`Digital`] rates.
    pub digital: Digital,

    /// [`Offset`] rates.
    pub offset: Offset,

    /// [`Sublimation`] rates.
    pub sublimation: Sublimation,

    /// Flat rate per square foot of jobs without a dedicated formula.
    #[default(Decimal::new(500, 2))]
    pub default_rate: Decimal,
}

/// Rates of large-format digital print.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Digital {
    /// Price of a printed square foot.
    #[default(Decimal::new(500, 2))]
    pub sqft_rate: Decimal,

    /// Price of a square foot of roll offcut.
    #[default(Decimal::new(400, 2))]
    pub offcut_sqft_rate: Decimal,

    /// Fixed width of the roll (in inches), if the printer uses one.
    pub roll_width: Option<Decimal>,

    /// Price of a single ring (eyelet).
    #[default(Decimal::new(30, 2))]
    pub ring_price: Decimal,

    /// Flat fee of pole mounting.
    #[default(Decimal::new(1000, 2))]
    pub pole_price: Decimal,
}

/// Rates of offset print.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Offset {
    /// Price of a printing plate.
    #[default(Decimal::new(2500, 2))]
    pub plate_price: Decimal,

    /// Price of a paper sheet.
    #[default(Decimal::new(5, 2))]
    pub paper_unit_cost: Decimal,

    /// Ink price of a single impression.
    #[default(Decimal::new(10, 2))]
    pub ink_unit_cost: Decimal,

    /// Price of a labor hour.
    #[default(Decimal::new(6000, 2))]
    pub labor_rate: Decimal,

    /// Flat setup fee.
    #[default(Decimal::new(10000, 2))]
    pub setup_fee: Decimal,

    /// Profit margin applied on top of the total cost.
    #[default(Percent::new(Decimal::from(30)).unwrap_or(Percent::ZERO))]
    pub profit_margin: Percent,
}

/// Rates of sublimation print.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Sublimation {
    /// Base cost of any sublimation job.
    #[default(Decimal::new(750, 2))]
    pub base_cost: Decimal,

    /// Price of a square foot of sublimation material.
    #[default(Decimal::new(300, 2))]
    pub material_cost_per_sqft: Decimal,

    /// Flat setup fee.
    #[default(Decimal::new(1500, 2))]
    pub setup_fee: Decimal,
}
