//! [`Command`] for updating a [`job::Status`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::job::Status;
use crate::{
    domain::{job, Job},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`job::Status`].
#[derive(Clone, Copy, Debug, From)]
pub struct UpdateJobStatus {
    /// ID of the [`Job`] which [`Status`] should be updated.
    pub job_id: job::Id,

    /// New [`Status`] of the [`Job`].
    pub status: job::Status,
}

impl<Db> Command<UpdateJobStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Job>, job::Id>>,
            Ok = Option<Job>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Job, job::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Job>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Job;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateJobStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateJobStatus { job_id, status } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(job_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut job = tx
            .execute(Select(By::<Option<Job>, _>::new(job_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::JobNotExists(job_id))
            .map_err(tracerr::wrap!())?;
        if job.status == status {
            return Ok(job);
        }

        log::debug!(%job_id, from = %job.status, to = %status, "`Job` status");

        job.status = status;
        tx.execute(Update(job.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(job)
    }
}

/// Error of [`UpdateJobStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Job`] doesn't exist.
    #[display("`Job(id: {_0})` does not exist")]
    #[from(ignore)]
    JobNotExists(#[error(not(source))] job::Id),
}
