//! [`JobType`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{job_type, JobType},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`JobType`] out of the provided [`Row`].
fn job_type(row: &Row) -> JobType {
    JobType {
        id: row.get("id"),
        name: row.get("name"),
        family: row.get("family"),
    }
}

impl<C> Database<Select<By<Option<JobType>, job_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<JobType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<JobType>, job_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, family \
            FROM job_types \
            WHERE id = $1::INT8";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(job_type))
    }
}

impl<C> Database<Select<By<Vec<JobType>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<JobType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, family \
            FROM job_types \
            ORDER BY name";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(job_type).collect())
    }
}
