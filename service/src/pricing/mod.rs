//! Pricing engine estimating the price of a print job.
//!
//! Estimates are advisory: invalid geometry never fails, but degrades to a
//! zero price.

pub mod rate_card;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing as log;

use crate::domain::job_type::Family;

pub use self::rate_card::RateCard;

/// Number of inches in a foot.
const INCHES_PER_FOOT: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Size and quantity of printed pieces.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Geometry {
    /// Width of a piece (in inches).
    pub width: Decimal,

    /// Height of a piece (in inches).
    pub height: Decimal,

    /// Number of pieces.
    pub quantity: u32,
}

impl Geometry {
    /// Indicates whether both width and height are positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > Decimal::ZERO && self.height > Decimal::ZERO
    }

    /// Returns the total printed area (in square feet), or [`None`] if it
    /// overflows.
    #[must_use]
    pub fn print_area(&self) -> Option<Decimal> {
        (self.width / INCHES_PER_FOOT)
            .checked_mul(self.height / INCHES_PER_FOOT)?
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Input of a price estimation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "family")]
pub enum Input {
    /// Input of [`Family::Digital`].
    Digital {
        /// [`Geometry`] of the print.
        #[serde(flatten)]
        geometry: Geometry,

        /// Number of rings (eyelets).
        #[serde(default)]
        ring_count: u32,

        /// Indicator whether the print is mounted on a pole.
        #[serde(default)]
        pole_mounting: bool,
    },

    /// Input of [`Family::Offset`].
    Offset {
        /// [`Geometry`] of the print.
        #[serde(flatten)]
        geometry: Geometry,

        /// Number of printing plates.
        #[serde(default)]
        plate_count: u32,

        /// Indicator whether both sides are printed.
        #[serde(default)]
        double_sided: bool,

        /// Time spent on the machine setup (in hours).
        #[serde(default)]
        setup_time_hours: Decimal,
    },

    /// Input of [`Family::Sublimation`].
    Sublimation {
        /// [`Geometry`] of the print.
        #[serde(flatten)]
        geometry: Geometry,
    },

    /// Input of [`Family::Other`].
    Other {
        /// [`Geometry`] of the print.
        #[serde(flatten)]
        geometry: Geometry,
    },
}

/// Family-specific inputs of a price estimation, all optional.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Number of rings of a [`Family::Digital`] print.
    pub ring_count: u32,

    /// Pole mounting of a [`Family::Digital`] print.
    pub pole_mounting: bool,

    /// Number of plates of a [`Family::Offset`] print.
    pub plate_count: u32,

    /// Double-sided [`Family::Offset`] print.
    pub double_sided: bool,

    /// Setup time of a [`Family::Offset`] print (in hours).
    pub setup_time_hours: Decimal,
}

impl Input {
    /// Creates a new [`Input`] of the provided [`Family`], picking the
    /// [`Options`] relevant to it.
    #[must_use]
    pub fn new(family: Family, geometry: Geometry, options: Options) -> Self {
        let Options {
            ring_count,
            pole_mounting,
            plate_count,
            double_sided,
            setup_time_hours,
        } = options;

        match family {
            Family::Digital => Self::Digital {
                geometry,
                ring_count,
                pole_mounting,
            },
            Family::Offset => Self::Offset {
                geometry,
                plate_count,
                double_sided,
                setup_time_hours,
            },
            Family::Sublimation => Self::Sublimation { geometry },
            Family::Other => Self::Other { geometry },
        }
    }

    /// Returns the [`Family`] of this [`Input`].
    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            Self::Digital { .. } => Family::Digital,
            Self::Offset { .. } => Family::Offset,
            Self::Sublimation { .. } => Family::Sublimation,
            Self::Other { .. } => Family::Other,
        }
    }

    /// Returns the [`Geometry`] of this [`Input`].
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        match self {
            Self::Digital { geometry, .. }
            | Self::Offset { geometry, .. }
            | Self::Sublimation { geometry }
            | Self::Other { geometry } => *geometry,
        }
    }
}

/// Estimates the price of the provided [`Input`] with the provided
/// [`RateCard`].
///
/// The result is not rounded. A price overflowing [`Decimal`] degrades to
/// zero.
#[must_use]
pub fn estimate(input: &Input, rates: &RateCard) -> Decimal {
    if !input.geometry().is_valid() {
        return Decimal::ZERO;
    }

    try_estimate(input, rates).unwrap_or_else(|| {
        log::warn!(
            "price of `{}` print overflows, estimated as zero",
            input.family(),
        );
        Decimal::ZERO
    })
}

/// Estimates the price of the provided [`Input`], returning [`None`] on
/// overflow.
fn try_estimate(input: &Input, rates: &RateCard) -> Option<Decimal> {
    match *input {
        Input::Digital {
            geometry,
            ring_count,
            pole_mounting,
        } => digital(&geometry, ring_count, pole_mounting, &rates.digital),
        Input::Offset {
            geometry,
            plate_count,
            double_sided,
            setup_time_hours,
        } => {
            let rates = &rates.offset;
            let quantity = Decimal::from(geometry.quantity);
            let impressions = if double_sided {
                quantity.checked_mul(Decimal::TWO)?
            } else {
                quantity
            };

            let base = [
                Decimal::from(plate_count).checked_mul(rates.plate_price)?,
                quantity.checked_mul(rates.paper_unit_cost)?,
                impressions.checked_mul(rates.ink_unit_cost)?,
                setup_time_hours.checked_mul(rates.labor_rate)?,
            ]
            .into_iter()
            .try_fold(rates.setup_fee, Decimal::checked_add)?;
            base.checked_mul(Decimal::ONE + rates.profit_margin.fraction())
        }
        Input::Sublimation { geometry } => {
            let rates = &rates.sublimation;
            geometry
                .print_area()?
                .checked_mul(rates.material_cost_per_sqft)?
                .checked_add(rates.base_cost)?
                .checked_add(rates.setup_fee)
        }
        Input::Other { geometry } => {
            geometry.print_area()?.checked_mul(rates.default_rate)
        }
    }
}

/// Estimates the price of a [`Family::Digital`] print.
fn digital(
    geometry: &Geometry,
    ring_count: u32,
    pole_mounting: bool,
    rates: &rate_card::Digital,
) -> Option<Decimal> {
    let base = geometry.print_area()?.checked_mul(rates.sqft_rate)?;

    let offcut = match rates
        .roll_width
        .map(|roll| roll - geometry.height)
        .filter(|h| *h > Decimal::ZERO)
    {
        Some(offcut_height) => (geometry.width / INCHES_PER_FOOT)
            .checked_mul(offcut_height / INCHES_PER_FOOT)?
            .checked_mul(rates.offcut_sqft_rate)?,
        None => Decimal::ZERO,
    };

    let rings = Decimal::from(ring_count).checked_mul(rates.ring_price)?;
    let pole = if pole_mounting {
        rates.pole_price
    } else {
        Decimal::ZERO
    };

    [offcut, rings, pole]
        .into_iter()
        .try_fold(base, Decimal::checked_add)
}
