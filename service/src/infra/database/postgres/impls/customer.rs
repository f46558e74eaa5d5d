//! [`Customer`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    command::create_customer::NewCustomer,
    domain::{customer, Customer},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Customer>, customer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, phone, email, address, created_at \
            FROM customers \
            WHERE id = $1::INT8";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Customer {
                id: row.get("id"),
                name: row.get("name"),
                phone: row.get("phone"),
                email: row.get("email"),
                address: row.get("address"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<NewCustomer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = customer::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(customer): Insert<NewCustomer>,
    ) -> Result<Self::Ok, Self::Err> {
        let NewCustomer {
            name,
            phone,
            email,
            address,
            created_at,
        } = customer;

        const SQL: &str = "\
            INSERT INTO customers (\
                name, phone, email, address, created_at\
            ) \
            VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::TIMESTAMPTZ\
            ) \
            RETURNING id";
        self.query_opt(SQL, &[&name, &phone, &email, &address, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always returned").get("id"))
    }
}
