//! [`DieCut`] of a print job.

use std::collections::BTreeSet;

use common::define_kind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Impression;

define_kind! {
    #[doc = "Operation performed by a die cutter."]
    enum Operation {
        #[doc = "Cutting with a newly made cutter."]
        NewCutter = 1,

        #[doc = "Cutting with an existing cutter."]
        OldCutter = 2,

        #[doc = "Creasing for folding."]
        Creasing = 3,

        #[doc = "Perforating for tearing off."]
        Perforating = 4,

        #[doc = "Raising a relief."]
        Embossing = 5,

        #[doc = "Sinking a relief."]
        Debossing = 6,
    }
}

/// Die-cutting of a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DieCut {
    /// Selected [`Operation`]s.
    pub operations: BTreeSet<Operation>,

    /// [`Impression`] count of the die cutter.
    pub impression: Impression,

    /// Manually entered impression result, overriding the derived one.
    pub manual_result: Option<Decimal>,
}

impl DieCut {
    /// Returns the impression result, preferring the manual override.
    #[must_use]
    pub fn result(&self) -> Decimal {
        self.manual_result
            .unwrap_or_else(|| self.impression.result())
    }

    /// Returns the impression result, preferring the manual override, or
    /// [`None`] if the derived one overflows.
    #[must_use]
    pub fn checked_result(&self) -> Option<Decimal> {
        self.manual_result
            .or_else(|| self.impression.checked_result())
    }

    /// Selects the provided [`Operation`] if it's not selected, or deselects
    /// it otherwise.
    #[must_use]
    pub fn toggle(mut self, op: Operation) -> Self {
        if !self.operations.remove(&op) {
            _ = self.operations.insert(op);
        }
        self
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{DieCut, Impression, Operation};

    #[test]
    fn manual_result_overrides_derived_one() {
        let mut die_cut = DieCut {
            impression: Impression {
                first: Decimal::from(10),
                second: Decimal::from(3),
            },
            ..DieCut::default()
        };
        assert_eq!(die_cut.result(), Decimal::from(30));

        die_cut.manual_result = Some(Decimal::from(25));
        assert_eq!(die_cut.result(), Decimal::from(25));
    }

    #[test]
    fn toggles_operations() {
        let die_cut = DieCut::default()
            .toggle(Operation::Creasing)
            .toggle(Operation::NewCutter)
            .toggle(Operation::Creasing);

        assert_eq!(
            die_cut.operations.into_iter().collect::<Vec<_>>(),
            [Operation::NewCutter],
        );
    }
}
