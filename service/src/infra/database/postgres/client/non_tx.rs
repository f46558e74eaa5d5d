//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection},
};

use super::delegate_connection;

/// Non-transactional Postgres database client.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] the client acquires its connections from.
    pub(crate) pool: connection::Pool,

    /// Acquired [`connection::NonTx`], if any.
    connection: Arc<RwLock<Option<connection::NonTx>>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client out of the provided
    /// [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            connection: Arc::default(),
        }
    }

    /// Returns the [`connection::NonTx`] of this client, acquiring it from
    /// the [`connection::Pool`] if there is none yet.
    pub(crate) async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        {
            let conn = self.connection.read().await;
            if conn.is_some() {
                return Ok(RwLockReadGuard::map(conn, |c| {
                    c.as_ref().expect("checked above")
                }));
            }
        }

        let mut conn = self.connection.write().await;
        if conn.is_none() {
            *conn = Some(
                self.pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?,
            );
        }
        Ok(RwLockReadGuard::map(conn.downgrade(), |c| {
            c.as_ref().expect("initialized above")
        }))
    }

    /// Takes the acquired [`connection::NonTx`] out of this client, so the
    /// next statement acquires a new one.
    #[must_use]
    pub(crate) async fn take_connection(&self) -> Option<connection::NonTx> {
        self.connection.write().await.take()
    }
}

delegate_connection!(NonTx);
