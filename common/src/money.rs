//! [`Money`]-related definitions.

use std::fmt;

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Number of fractional digits a [`Money`] amount is rounded to.
    pub const SCALE: u32 = 2;

    /// Creates a new [`Money`] rounding the `amount` to cents, half away from
    /// zero.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp_with_strategy(
                Self::SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let currency = currency.to_string().to_uppercase();
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Indian Rupee."]
        Inr = 3,
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("533.00"),
                currency: Currency::Usd,
            }
            .to_string(),
            "533USD",
        );
        assert_eq!(
            Money {
                amount: decimal("31.20"),
                currency: Currency::Eur,
            }
            .to_string(),
            "31.20EUR",
        );
    }

    #[test]
    fn new_rounds_to_cents() {
        assert_eq!(
            Money::new(decimal("10.125"), Currency::Usd).amount,
            decimal("10.13"),
        );
        assert_eq!(
            Money::new(decimal("10.124"), Currency::Usd).amount,
            decimal("10.12"),
        );
        assert_eq!(
            Money::new(decimal("-0.005"), Currency::Usd).amount,
            decimal("-0.01"),
        );
    }
}
