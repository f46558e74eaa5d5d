//! [`Command`] for creating a new [`Customer`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::customer::{Address, Email, Name, Phone};
use crate::{
    domain::{customer, specification::Contact, Customer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Customer`].
#[derive(Clone, Debug)]
pub struct CreateCustomer {
    /// [`Name`] of a new [`Customer`].
    pub name: customer::Name,

    /// [`Phone`] of a new [`Customer`].
    pub phone: Option<customer::Phone>,

    /// [`Email`] of a new [`Customer`].
    pub email: Option<customer::Email>,

    /// [`Address`] of a new [`Customer`].
    pub address: Option<customer::Address>,
}

impl From<Contact> for CreateCustomer {
    fn from(contact: Contact) -> Self {
        let Contact {
            name,
            phone,
            email,
            address,
        } = contact;
        Self {
            name,
            phone,
            email,
            address,
        }
    }
}

/// New [`Customer`] not stored yet.
#[derive(Clone, Debug)]
pub struct NewCustomer {
    /// [`Name`] of the [`Customer`].
    pub name: customer::Name,

    /// [`Phone`] of the [`Customer`].
    pub phone: Option<customer::Phone>,

    /// [`Email`] of the [`Customer`].
    pub email: Option<customer::Email>,

    /// [`Address`] of the [`Customer`].
    pub address: Option<customer::Address>,

    /// Creation date of the [`Customer`].
    pub created_at: customer::CreationDateTime,
}

impl<Db> Command<CreateCustomer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<NewCustomer>,
            Ok = customer::Id,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Customer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCustomer {
            name,
            phone,
            email,
            address,
        } = cmd;

        let new = NewCustomer {
            name,
            phone,
            email,
            address,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let id = tx
            .execute(Insert(new.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let NewCustomer {
            name,
            phone,
            email,
            address,
            created_at,
        } = new;
        Ok(Customer {
            id,
            name,
            phone,
            email,
            address,
            created_at,
        })
    }
}

/// Error of [`CreateCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
