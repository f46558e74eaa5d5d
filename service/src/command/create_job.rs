//! [`Command`] for creating a new [`Job`] out of a [`JobSpecification`].

use std::fmt;

use common::{
    operations::{By, Commit, Insert, Rollback, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        customer,
        job::{row, Subsection},
        job_type,
        specification::{CustomerRef, Decomposition, ValidationError},
        Customer, Job, JobSpecification, JobType,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Job`] out of a [`JobSpecification`].
///
/// The [`Job`] and all its subsection rows are written in a single
/// transaction: either all of them are stored, or none.
#[derive(Clone, Debug)]
pub struct CreateJob {
    /// [`JobSpecification`] of a new [`Job`].
    pub specification: JobSpecification,

    /// ID of the [`JobType`] of a new [`Job`].
    pub job_type_id: job_type::Id,

    /// ID of the existing [`Customer`] ordering a new [`Job`].
    pub customer_id: customer::Id,
}

/// [`Database`] storing the child rows of a [`Job`].
pub trait JobRows:
    Database<Insert<row::Color>, Ok = (), Err = Traced<database::Error>>
    + Database<Insert<row::PaperItem>, Ok = (), Err = Traced<database::Error>>
    + Database<
        Insert<row::PrintingMethod>,
        Ok = (),
        Err = Traced<database::Error>,
    > + Database<Insert<row::Laminating>, Ok = (), Err = Traced<database::Error>>
    + Database<Insert<row::DieCut>, Ok = (), Err = Traced<database::Error>>
    + Database<
        Insert<row::BillBook>,
        Ok = row::BillBookId,
        Err = Traced<database::Error>,
    > + Database<
        Insert<row::BillBookPaper>,
        Ok = row::BillBookPaperId,
        Err = Traced<database::Error>,
    > + Database<
        Insert<row::BillBookPaperColor>,
        Ok = (),
        Err = Traced<database::Error>,
    > + Database<
        Insert<row::MaterialSupply>,
        Ok = row::MaterialSupplyId,
        Err = Traced<database::Error>,
    > + Database<
        Insert<row::MaterialSupplyItem>,
        Ok = (),
        Err = Traced<database::Error>,
    >
{
}

impl<T> JobRows for T where
    T: Database<Insert<row::Color>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<row::PaperItem>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<row::PrintingMethod>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<row::Laminating>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<row::DieCut>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<row::BillBook>,
            Ok = row::BillBookId,
            Err = Traced<database::Error>,
        > + Database<
            Insert<row::BillBookPaper>,
            Ok = row::BillBookPaperId,
            Err = Traced<database::Error>,
        > + Database<
            Insert<row::BillBookPaperColor>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<row::MaterialSupply>,
            Ok = row::MaterialSupplyId,
            Err = Traced<database::Error>,
        > + Database<
            Insert<row::MaterialSupplyItem>,
            Ok = (),
            Err = Traced<database::Error>,
        >
{
}

impl<Db> Command<CreateJob> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Customer>, customer::Id>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<JobType>, job_type::Id>>,
            Ok = Option<JobType>,
            Err = Traced<database::Error>,
        > + Database<Insert<row::NewJob>, Ok = Job, Err = Traced<database::Error>>
        + JobRows
        + Database<Commit, Err = Traced<database::Error>>
        + Database<Rollback, Err = Traced<database::Error>>,
{
    type Ok = read::job::Details;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateJob) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateJob {
            mut specification,
            job_type_id,
            customer_id,
        } = cmd;

        match &specification.customer {
            None => {
                specification.customer =
                    Some(CustomerRef::Existing(customer_id));
            }
            Some(CustomerRef::Existing(id)) if *id != customer_id => {
                return Err(tracerr::new!(E::CustomerMismatch {
                    expected: customer_id,
                    actual: *id,
                }));
            }
            Some(CustomerRef::Existing(_)) => {}
            Some(CustomerRef::Inline(_)) => {
                return Err(tracerr::new!(E::InlineCustomer));
            }
        }
        let specification = specification
            .normalize()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CustomerNotExists(customer_id))
            .map_err(tracerr::wrap!())?;
        let job_type = tx
            .execute(Select(By::<Option<JobType>, _>::new(job_type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::JobTypeNotExists(job_type_id))
            .map_err(tracerr::wrap!())?;

        let job = tx
            .execute(Insert(specification.parent(
                job_type_id,
                customer_id,
                DateTime::now().coerce(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Err(e) = insert_rows(&tx, &specification.decompose(job.id)).await
        {
            _ = tx.execute(Rollback).await.map_err(|e| {
                log::warn!("failed to roll back `Job` creation: {e}");
            });
            return Err(e);
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(job_id = %job.id, "`Job` created");

        Ok(read::job::Details {
            job,
            job_type,
            customer,
            specification,
        })
    }
}

/// Inserts all the rows of the provided [`Decomposition`] in order of their
/// [`Subsection`]s.
async fn insert_rows<Db: JobRows>(
    db: &Db,
    rows: &Decomposition,
) -> Result<(), Traced<ExecutionError>> {
    use Subsection as S;

    for color in &rows.colors {
        insert(db, S::Colors, color.clone()).await?;
    }
    for item in &rows.paper_items {
        insert(db, S::PaperItems, item.clone()).await?;
    }
    insert(db, S::PrintingMethod, rows.printing_method.clone()).await?;
    insert(db, S::Laminating, rows.laminating.clone()).await?;
    insert(db, S::DieCut, rows.die_cut.clone()).await?;

    let bill_book_id =
        insert(db, S::BillBook, rows.bill_book.book.clone()).await?;
    for paper in &rows.bill_book.papers {
        let paper_id = insert(db, S::BillBook, paper.paper(bill_book_id)).await?;
        for color in paper.colors(paper_id) {
            insert(db, S::BillBook, color).await?;
        }
    }

    let supply_id =
        insert(db, S::MaterialSupply, rows.material_supply.supply).await?;
    for item in rows.material_supply.items(supply_id) {
        insert(db, S::MaterialSupply, item).await?;
    }

    Ok(())
}

/// Inserts the provided `row` of the provided [`Subsection`], logging it on
/// failure.
async fn insert<Db, R>(
    db: &Db,
    subsection: Subsection,
    row: R,
) -> Result<<Db as Database<Insert<R>>>::Ok, Traced<ExecutionError>>
where
    Db: Database<Insert<R>, Err = Traced<database::Error>>,
    R: Clone + fmt::Debug,
{
    db.execute(Insert(row.clone())).await.map_err(|e| {
        log::error!(
            %subsection,
            ?row,
            "failed to insert `Job` subsection row: {e}",
        );
        tracerr::new!(ExecutionError::Subsection {
            subsection,
            source: e.into_inner(),
        })
    })
}

/// Error of [`CreateJob`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`JobSpecification`] is not valid.
    #[display("Invalid job specification: {_0}")]
    #[from]
    Invalid(ValidationError),

    /// [`JobSpecification`] refers to another [`Customer`] than requested.
    #[display(
        "Job specification refers to `Customer(id: {actual})`, \
         but `Customer(id: {expected})` is requested"
    )]
    CustomerMismatch {
        /// ID of the requested [`Customer`].
        expected: customer::Id,

        /// ID of the [`Customer`] in the [`JobSpecification`].
        actual: customer::Id,
    },

    /// [`JobSpecification`] contains a new [`Customer`] not created yet.
    #[display("Inline customer must be created before the job")]
    InlineCustomer,

    /// [`Customer`] doesn't exist.
    #[display("`Customer(id: {_0})` does not exist")]
    CustomerNotExists(#[error(not(source))] customer::Id),

    /// [`JobType`] doesn't exist.
    #[display("`JobType(id: {_0})` does not exist")]
    JobTypeNotExists(#[error(not(source))] job_type::Id),

    /// Failed to store a [`Subsection`] of the [`Job`].
    #[display("Failed to store {subsection} of the job: {source}")]
    Subsection {
        /// [`Subsection`] failed to be stored.
        #[error(not(source))]
        subsection: Subsection,

        /// [`Database`] error.
        source: database::Error,
    },
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::money::Currency;

    use crate::{
        domain::{
            customer,
            job::Subsection,
            job_type,
            specification::{
                spec::complete, Color, Colors, CustomerRef, JobSpecification,
                Laminating, ValidationError,
            },
        },
        infra::database::mock::Mock,
        pricing::RateCard,
        Command as _, Config, Service,
    };

    use super::{CreateJob, ExecutionError};

    fn service(db: &Mock) -> Service<Mock> {
        Service::new(
            Config {
                currency: Currency::Usd,
                rates: RateCard::default(),
            },
            db.clone(),
        )
    }

    fn create(specification: JobSpecification) -> CreateJob {
        CreateJob {
            specification,
            job_type_id: job_type::Id::from(2),
            customer_id: customer::Id::from(7),
        }
    }

    fn count(db: &Mock, subsection: Subsection) -> usize {
        db.state()
            .rows
            .iter()
            .filter(|r| r.subsection == subsection)
            .count()
    }

    #[tokio::test]
    async fn stores_defaults_of_skipped_subsections() {
        let db = Mock::seeded();

        let details = service(&db).execute(create(complete())).await.unwrap();

        assert_eq!(details.job.customer_id, customer::Id::from(7));
        assert_eq!(details.job_type.id, job_type::Id::from(2));
        assert_eq!(db.state().jobs, [details.job.clone()]);
        assert_eq!(db.state().commits, 1);
        assert_eq!(count(&db, Subsection::Colors), 0);
        assert_eq!(count(&db, Subsection::PaperItems), 0);
        assert_eq!(count(&db, Subsection::PrintingMethod), 1);
        assert_eq!(count(&db, Subsection::Laminating), 1);
        assert_eq!(count(&db, Subsection::DieCut), 1);
        assert_eq!(count(&db, Subsection::BillBook), 1);
        assert_eq!(count(&db, Subsection::MaterialSupply), 1 + 7);
    }

    #[tokio::test]
    async fn fills_customer_from_request() {
        let db = Mock::seeded();
        let spec = JobSpecification {
            customer: None,
            colors: Some(Colors {
                palette: BTreeSet::from([Color::Black, Color::Cyan]),
                custom: None,
            }),
            ..complete()
        };

        let details = service(&db).execute(create(spec)).await.unwrap();

        assert_eq!(
            details.specification.customer,
            CustomerRef::Existing(customer::Id::from(7)),
        );
        assert_eq!(count(&db, Subsection::Colors), 2);
    }

    #[tokio::test]
    async fn rolls_back_everything_on_subsection_failure() {
        let db = Mock::seeded().fail_on(Subsection::Laminating);

        let err = service(&db)
            .execute(create(complete()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Subsection {
                subsection: Subsection::Laminating,
                ..
            },
        ));
        assert!(err.to_string().contains("laminating"));

        let state = db.state();
        assert!(state.jobs.is_empty());
        assert!(state.rows.is_empty());
        assert_eq!(state.commits, 0);
        assert_eq!(state.rollbacks, 1);
    }

    #[tokio::test]
    async fn rejects_missing_customer() {
        let db = Mock::seeded();
        let cmd = CreateJob {
            customer_id: customer::Id::from(8),
            specification: JobSpecification {
                customer: None,
                ..complete()
            },
            ..create(complete())
        };

        let err = service(&db).execute(cmd).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::CustomerNotExists(id) if *id == customer::Id::from(8),
        ));
        assert!(db.state().jobs.is_empty());
    }

    #[tokio::test]
    async fn rejects_mismatched_customer() {
        let db = Mock::seeded();
        let spec = JobSpecification {
            customer: Some(CustomerRef::Existing(customer::Id::from(9))),
            ..complete()
        };

        let err = service(&db).execute(create(spec)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::CustomerMismatch { .. },
        ));
    }

    #[tokio::test]
    async fn invalid_specification_writes_nothing() {
        let db = Mock::seeded();
        let spec = JobSpecification {
            job_name: None,
            ..complete()
        };

        let err = service(&db).execute(create(spec)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Invalid(ValidationError::MissingField(_)),
        ));
        let state = db.state();
        assert!(state.jobs.is_empty());
        assert_eq!(state.commits + state.rollbacks, 0);
    }

    #[tokio::test]
    async fn overflowing_result_is_rejected_before_writes() {
        let db = Mock::seeded();
        let spec = JobSpecification {
            laminating: Some(Laminating {
                quantity: u32::MAX,
                unit_price: rust_decimal::Decimal::MAX
                    / rust_decimal::Decimal::from(1000),
                ..Laminating::default()
            }),
            ..complete()
        };

        let err = service(&db).execute(create(spec)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Invalid(ValidationError::TooLarge("laminating")),
        ));
        let state = db.state();
        assert!(state.jobs.is_empty());
        assert_eq!(state.commits + state.rollbacks, 0);
    }
}
