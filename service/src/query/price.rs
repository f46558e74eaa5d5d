//! [`Query`] estimating a price of a job.

use std::convert::Infallible;

use common::{operations::Estimate, Money};

use crate::{pricing, Query, Service};

/// [`Query`] estimating a price of a job out of its [`pricing::Input`].
pub type EstimatePrice = Estimate<pricing::Input>;

impl<Db> Query<EstimatePrice> for Service<Db> {
    type Ok = Money;
    type Err = Infallible;

    async fn execute(
        &self,
        Estimate(input): EstimatePrice,
    ) -> Result<Self::Ok, Self::Err> {
        let config = self.config();
        Ok(Money::new(
            pricing::estimate(&input, &config.rates),
            config.currency,
        ))
    }
}
