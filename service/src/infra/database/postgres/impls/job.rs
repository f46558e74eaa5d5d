//! [`Job`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        job::{self, row},
        specification::PaperSupply,
        Job,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::job::list,
};

/// Columns of the `jobs` table read into a [`Job`].
const COLUMNS: &str = "\
    id, job_type_id, customer_id, number, name, quantity, delivery_date, \
    status, paper_supplied_by_customer, supplied_paper_type, \
    paper_cut_by_customer, cut_paper_type, created_at";

/// Reads a [`Job`] out of the provided [`Row`].
fn job(row: &Row) -> Job {
    Job {
        id: row.get("id"),
        job_type_id: row.get("job_type_id"),
        customer_id: row.get("customer_id"),
        number: row.get("number"),
        name: row.get("name"),
        quantity: row.get("quantity"),
        delivery_date: row.get("delivery_date"),
        status: row.get("status"),
        paper_supply: PaperSupply {
            supplied_by_customer: row.get("paper_supplied_by_customer"),
            supplied_paper_type: row.get("supplied_paper_type"),
            cut_by_customer: row.get("paper_cut_by_customer"),
            cut_paper_type: row.get("cut_paper_type"),
        },
        created_at: row.get("created_at"),
    }
}

/// Renders `AND` conditions of the provided [`list::Filter`], pushing their
/// values into the provided parameters.
fn filter_sql<'p>(
    filter: &'p list::Filter,
    ps: &mut Vec<&'p (dyn ToSql + Sync)>,
) -> String {
    let list::Filter {
        status,
        customer_id,
    } = filter;

    let status_idx = status.as_ref().map(|s| {
        ps.push(s);
        ps.len()
    });
    let customer_idx = customer_id.as_ref().map(|c| {
        ps.push(c);
        ps.len()
    });

    format!(
        "{status} {customer}",
        status = status_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND status = ${idx}::INT2"))
        }),
        customer = customer_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND customer_id = ${idx}::INT8"))
        }),
    )
}

impl<C> Database<Insert<row::NewJob>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Job;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<row::NewJob>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::NewJob {
            job_type_id,
            customer_id,
            number,
            name,
            quantity,
            delivery_date,
            status,
            paper_supply,
            created_at,
        } = new;

        const SQL: &str = "\
            INSERT INTO jobs (\
                job_type_id, customer_id, \
                number, name, quantity, delivery_date, status, \
                paper_supplied_by_customer, supplied_paper_type, \
                paper_cut_by_customer, cut_paper_type, \
                created_at\
            ) \
            VALUES (\
                $1::INT8, $2::INT8, \
                $3::VARCHAR, $4::VARCHAR, $5::INT4, $6::TIMESTAMPTZ, \
                $7::INT2, \
                $8::BOOL, $9::VARCHAR, \
                $10::BOOL, $11::VARCHAR, \
                $12::TIMESTAMPTZ\
            ) \
            RETURNING id";
        let id = self
            .query_opt(
                SQL,
                &[
                    &job_type_id,
                    &customer_id,
                    &number,
                    &name,
                    &quantity,
                    &delivery_date,
                    &status,
                    &paper_supply.supplied_by_customer,
                    &paper_supply.supplied_paper_type,
                    &paper_supply.cut_by_customer,
                    &paper_supply.cut_paper_type,
                    &created_at,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .expect("always returned")
            .get("id");

        Ok(Job {
            id,
            job_type_id,
            customer_id,
            number,
            name,
            quantity,
            delivery_date,
            status,
            paper_supply,
            created_at,
        })
    }
}

impl<C> Database<Select<By<Option<Job>, job::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Job>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Job>, job::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1::INT8");
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(job))
    }
}

impl<C> Database<Lock<By<Job, job::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Job, job::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM jobs \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<Job>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(job): Update<Job>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE jobs \
            SET status = $2::INT2, \
                delivery_date = $3::TIMESTAMPTZ \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&job.id, &job.status, &job.delivery_date])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();

        // One more row tells whether there is a next page.
        let limit = i64::try_from(arguments.limit()).unwrap_or(i64::MAX) + 1;
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM jobs \
             WHERE TRUE {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1::INT8 OFFSET $2::INT8",
            filter = filter_sql(&filter, &mut ps),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(list::Page::new(arguments, rows.iter().map(job)))
    }
}

impl<C> Database<Select<By<list::TotalCount, list::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::TotalCount, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let sql = format!(
            "SELECT COUNT(*) \
             FROM jobs \
             WHERE TRUE {filter}",
            filter = filter_sql(&filter, &mut ps),
        );
        self.query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
