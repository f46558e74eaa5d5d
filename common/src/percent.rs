//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Floating-point percentage in the `0..=100` range.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is within the
    /// `0..=100` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns this [`Percent`] as a fraction of one (`30%` is `0.3`).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl From<Percent> for Decimal {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent must be within `0..=100`")
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn checks_range() {
        assert!(Percent::from_str("0").is_ok());
        assert!(Percent::from_str("30").is_ok());
        assert!(Percent::from_str("100").is_ok());
        assert!(Percent::from_str("100.01").is_err());
        assert!(Percent::from_str("-1").is_err());
        assert!(Percent::from_str("thirty").is_err());
    }

    #[test]
    fn converts_to_fraction() {
        assert_eq!(
            Percent::from_str("30").unwrap().fraction(),
            Decimal::from_str("0.3").unwrap(),
        );
        assert_eq!(Percent::ZERO.fraction(), Decimal::ZERO);
    }

    #[test]
    fn deserializes_with_validation() {
        let p: Percent = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(p, Percent::from_str("12.5").unwrap());

        assert!(serde_json::from_str::<Percent>("\"150\"").is_err());
    }
}
