//! In-memory [`Database`] for testing [`Command`]s.
//!
//! [`Command`]: crate::Command

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{
    By, Commit, Insert, Lock, Rollback, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    command::create_customer::NewCustomer,
    domain::{
        customer, job,
        job::{row, Subsection},
        job_type, Customer, Job, JobType,
    },
    infra::{database, Database},
};

/// Row stored by the [`Mock`] database.
#[derive(Clone, Debug)]
pub(crate) struct StoredRow {
    /// [`Subsection`] the row belongs to.
    pub(crate) subsection: Subsection,

    /// [`fmt::Debug`] representation of the row.
    pub(crate) repr: String,
}

/// Committed state of the [`Mock`] database.
#[derive(Debug, Default)]
pub(crate) struct State {
    /// Stored [`Customer`]s.
    pub(crate) customers: Vec<Customer>,

    /// Stored [`JobType`]s.
    pub(crate) job_types: Vec<JobType>,

    /// Stored [`Job`]s.
    pub(crate) jobs: Vec<Job>,

    /// Stored child rows of [`Job`]s.
    pub(crate) rows: Vec<StoredRow>,

    /// Last generated ID.
    last_id: i64,

    /// [`Subsection`] failing on insertion.
    pub(crate) fail_on: Option<Subsection>,

    /// Number of committed transactions.
    pub(crate) commits: usize,

    /// Number of rolled back transactions.
    pub(crate) rollbacks: usize,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory [`Database`] with transactional semantics.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mock(Arc<Mutex<State>>);

impl Mock {
    /// Creates a new [`Mock`] database with the provided [`Customer`] and
    /// [`JobType`] stored.
    pub(crate) fn seeded() -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state();
            state.customers.push(Customer {
                id: customer::Id::from(7),
                name: "Acme Stationery".parse().unwrap(),
                phone: None,
                email: None,
                address: None,
                created_at: common::DateTime::now().coerce(),
            });
            state.job_types.push(JobType {
                id: job_type::Id::from(2),
                name: "Offset".parse().unwrap(),
                family: job_type::Family::Offset,
            });
            state.last_id = 100;
        }
        mock
    }

    /// Makes insertion of the provided [`Subsection`] rows fail.
    pub(crate) fn fail_on(self, subsection: Subsection) -> Self {
        self.state().fail_on = Some(subsection);
        self
    }

    /// Locks the committed [`State`] of this [`Mock`] database.
    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }
}

/// Uncommitted changes of a [`MockTx`].
#[derive(Debug, Default)]
struct Pending {
    customers: Vec<Customer>,
    jobs: Vec<Job>,
    rows: Vec<StoredRow>,
}

/// Transaction of the [`Mock`] database.
///
/// Dropping it without a [`Commit`] discards all its changes.
#[derive(Debug)]
pub(crate) struct MockTx {
    db: Mock,
    pending: Mutex<Pending>,
}

impl MockTx {
    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap()
    }
}

impl Database<Transact> for Mock {
    type Ok = MockTx;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(MockTx {
            db: self.clone(),
            pending: Mutex::default(),
        })
    }
}

impl Database<Commit> for MockTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        let Pending {
            customers,
            jobs,
            rows,
        } = std::mem::take(&mut *self.pending());
        let mut state = self.db.state();
        state.customers.extend(customers);
        state.jobs.extend(jobs);
        state.rows.extend(rows);
        state.commits += 1;
        Ok(())
    }
}

impl Database<Rollback> for MockTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Rollback) -> Result<Self::Ok, Self::Err> {
        *self.pending() = Pending::default();
        self.db.state().rollbacks += 1;
        Ok(())
    }
}

impl Database<Select<By<Option<Customer>, customer::Id>>> for MockTx {
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.db.state().customers.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Select<By<Option<JobType>, job_type::Id>>> for MockTx {
    type Ok = Option<JobType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<JobType>, job_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.db.state().job_types.iter().find(|t| t.id == id).cloned())
    }
}

impl Database<Select<By<Option<Job>, job::Id>>> for MockTx {
    type Ok = Option<Job>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Job>, job::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.db.state().jobs.iter().find(|j| j.id == id).cloned())
    }
}

impl Database<Lock<By<Job, job::Id>>> for MockTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Job, job::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Update<Job>> for MockTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(job): Update<Job>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.db.state();
        if let Some(stored) = state.jobs.iter_mut().find(|j| j.id == job.id) {
            *stored = job;
        }
        Ok(())
    }
}

impl Database<Insert<NewCustomer>> for MockTx {
    type Ok = customer::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<NewCustomer>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = customer::Id::from(self.db.state().next_id());
        let NewCustomer {
            name,
            phone,
            email,
            address,
            created_at,
        } = new;
        self.pending().customers.push(Customer {
            id,
            name,
            phone,
            email,
            address,
            created_at,
        });
        Ok(id)
    }
}

impl Database<Insert<row::NewJob>> for MockTx {
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
        let job = Job {
            id: job::Id::from(self.db.state().next_id()),
            job_type_id,
            customer_id,
            number,
            name,
            quantity,
            delivery_date,
            status,
            paper_supply,
            created_at,
        };
        self.pending().jobs.push(job.clone());
        Ok(job)
    }
}

impl MockTx {
    /// Stores the provided child `row`, returning its generated ID.
    fn insert_row(
        &self,
        subsection: Subsection,
        row: &impl fmt::Debug,
    ) -> Result<i64, Traced<database::Error>> {
        if self.db.state().fail_on == Some(subsection) {
            return Err(tracerr::new!(database::Error::Mock(
                "subsection insertion"
            )));
        }
        let id = self.db.state().next_id();
        self.pending().rows.push(StoredRow {
            subsection,
            repr: format!("{row:?}"),
        });
        Ok(id)
    }
}

/// Implements [`Database`] insertion of child rows for the [`MockTx`].
macro_rules! impl_insert_row {
    ($($row:ty => $subsection:ident $(as $id:ty)?),* $(,)?) => {$(
        impl Database<Insert<$row>> for MockTx {
            type Ok = impl_insert_row!(@ok $($id)?);
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Insert(row): Insert<$row>,
            ) -> Result<Self::Ok, Self::Err> {
                let id = self.insert_row(Subsection::$subsection, &row)?;
                Ok(impl_insert_row!(@id id $($id)?))
            }
        }
    )*};
    (@ok) => { () };
    (@ok $id:ty) => { $id };
    (@id $v:ident) => { drop($v) };
    (@id $v:ident $id:ty) => { $v };
}

impl_insert_row! {
    row::Color => Colors,
    row::PaperItem => PaperItems,
    row::PrintingMethod => PrintingMethod,
    row::Laminating => Laminating,
    row::DieCut => DieCut,
    row::BillBook => BillBook as row::BillBookId,
    row::BillBookPaper => BillBook as row::BillBookPaperId,
    row::BillBookPaperColor => BillBook,
    row::MaterialSupply => MaterialSupply as row::MaterialSupplyId,
    row::MaterialSupplyItem => MaterialSupply,
}
