//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection},
};

use super::{delegate_connection, NonTx};

/// Transactional Postgres database client.
///
/// The transaction starts lazily on the first statement and lasts until
/// [`Tx::commit()`] or [`Tx::rollback()`] is called, or the client is dropped
/// (which rolls it back).
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to acquire a connection from, when the
    /// [`NonTx`] client has none.
    pool: connection::Pool,

    /// [`NonTx`] client whose connection is reused for the transaction.
    origin: Arc<Mutex<Option<NonTx>>>,

    /// Started [`connection::Tx`], if any.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client out of the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool.clone(),
            origin: Arc::new(Mutex::new(Some(client))),
            tx: Arc::default(),
        }
    }

    /// Returns the [`connection::Tx`] of this client, starting it if there is
    /// none yet.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        {
            let tx = self.tx.read().await;
            if tx.is_some() {
                return Ok(RwLockReadGuard::map(tx, |t| {
                    t.as_ref().expect("checked above")
                }));
            }
        }

        let mut tx = self.tx.write().await;
        if tx.is_none() {
            let reused = match self.origin.lock().await.take() {
                Some(client) => client.take_connection().await,
                None => None,
            };
            let conn = match reused {
                Some(conn) => conn,
                None => self
                    .pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?,
            };
            *tx = Some(
                connection::Tx::from_non_tx(conn)
                    .await
                    .map_err(tracerr::wrap!())?,
            );
        }
        Ok(RwLockReadGuard::map(tx.downgrade(), |t| {
            t.as_ref().expect("initialized above")
        }))
    }

    /// Commits the transaction of this [`Tx`] client, if it has started.
    ///
    /// # Errors
    ///
    /// If failed to commit the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        match self.tx.write().await.take() {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }

    /// Rolls the transaction of this [`Tx`] client back, if it has started.
    ///
    /// # Errors
    ///
    /// If failed to roll the transaction back.
    pub async fn rollback(&self) -> Result<(), Traced<database::Error>> {
        match self.tx.write().await.take() {
            Some(tx) => tx.rollback().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

delegate_connection!(Tx);
