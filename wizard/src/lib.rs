//! Headless wizard building a [`JobSpecification`] step by step and
//! submitting it to the server.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod step;
pub mod submit;

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use common::Handler;
use derive_more::{Display, Error, From};
use service::domain::{
    job, job_type,
    specification::{
        bill_book::BindingKind, JobSpecification, Patch, ValidationError,
    },
};
use tracerr::Traced;
use tracing as log;

pub use self::{
    step::Step,
    submit::{HttpSubmitter, SubmitError, Submission},
};

/// Callback receiving the full [`JobSpecification`] after every change.
pub type OnChange = Box<dyn Fn(&JobSpecification) + Send + Sync>;

/// Position of a [`Wizard`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Position {
    /// Editing the [`Step`].
    Step(Step),

    /// Reviewing the read-only summary before confirmation.
    Summary,
}

/// Template preview of a selected [`BindingKind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Preview {
    /// [`BindingKind`] being previewed.
    pub binding: BindingKind,

    /// Path to the template image of the [`BindingKind`].
    pub template: &'static str,
}

/// Wizard controlling the editing of a single [`JobSpecification`] draft.
///
/// Every edit is merged into the draft producing a new value, which is then
/// reported through the [`OnChange`] callback. The draft follows the
/// externally supplied [`JobSpecification`] via [`Wizard::sync()`], but
/// never writes back into it.
pub struct Wizard<S> {
    /// Mutable state of this [`Wizard`].
    state: Mutex<State>,

    /// Indicator whether a [`Submission`] is in flight.
    is_submitting: AtomicBool,

    /// ID of the [`job_type::JobType`] being configured.
    job_type_id: job_type::Id,

    /// [`OnChange`] callback.
    on_change: OnChange,

    /// [`Handler`] performing [`Submission`]s.
    submitter: S,
}

impl Default for Position {
    fn default() -> Self {
        Self::Step(Step::FIRST)
    }
}

#[derive(Debug, Default)]
struct State {
    draft: JobSpecification,
    external: Option<JobSpecification>,
    position: Position,
    preview: Option<Preview>,
}

impl<S> fmt::Debug for Wizard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("state", &self.state)
            .field("is_submitting", &self.is_submitting)
            .field("job_type_id", &self.job_type_id)
            .finish_non_exhaustive()
    }
}

impl<S> Wizard<S> {
    /// Creates a new [`Wizard`] for the provided [`job_type::JobType`],
    /// starting with an empty draft on the [`Step::FIRST`].
    pub fn new(
        job_type_id: job_type::Id,
        submitter: S,
        on_change: impl Fn(&JobSpecification) + Send + Sync + 'static,
    ) -> Self {
        Self {
            state: Mutex::default(),
            is_submitting: AtomicBool::new(false),
            job_type_id,
            on_change: Box::new(on_change),
            submitter,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> JobSpecification {
        self.state().draft.clone()
    }

    /// Returns the current [`Position`].
    #[must_use]
    pub fn position(&self) -> Position {
        self.state().position
    }

    /// Returns the opened binding [`Preview`], if any.
    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        self.state().preview
    }

    /// Indicates whether a [`Submission`] is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting.load(Ordering::Acquire)
    }

    /// Replaces the draft with the provided `external` [`JobSpecification`]
    /// if it differs from the one seen previously.
    pub fn sync(&self, external: &JobSpecification) {
        let mut state = self.state();
        if state.external.as_ref() != Some(external) {
            state.draft = external.clone();
            state.external = Some(external.clone());
        }
    }

    /// Merges the provided [`Patch`] into the draft and reports the result.
    ///
    /// Selecting a [`BindingKind`] opens its [`Preview`]. The draft is
    /// frozen on the summary and while it's being submitted, so the
    /// [`Patch`] is ignored there.
    pub fn apply(&self, patch: Patch) {
        let draft = {
            let mut state = self.state();
            if state.position == Position::Summary || self.is_submitting() {
                log::warn!(
                    "`{patch:?}` ignored: draft is frozen",
                );
                return;
            }
            if let Patch::SetBinding(Some(binding)) = &patch {
                state.preview = Some(Preview {
                    binding: *binding,
                    template: binding.template(),
                });
            }
            let draft = state.draft.clone().with(patch);
            state.draft = draft.clone();
            draft
        };
        (self.on_change)(&draft);
    }

    /// Closes the opened binding [`Preview`], if any.
    pub fn close_preview(&self) {
        self.state().preview = None;
    }

    /// Advances to the next [`Step`], or to the summary from the
    /// [`Step::LAST`] one.
    pub fn next(&self) {
        let mut state = self.state();
        state.position = match state.position {
            Position::Step(Step::LAST) | Position::Summary => Position::Summary,
            Position::Step(step) => Position::Step(step.next()),
        };
    }

    /// Returns to the previous [`Step`], or to the [`Step::LAST`] one from
    /// the summary.
    pub fn previous(&self) {
        let mut state = self.state();
        state.position = match state.position {
            Position::Step(step) => Position::Step(step.previous()),
            Position::Summary => Position::Step(Step::LAST),
        };
    }

    /// Skips the current [`Step`] if it's [skippable](Step::is_skippable).
    ///
    /// Returns whether the [`Step`] has been skipped.
    pub fn skip(&self) -> bool {
        let skippable = matches!(
            self.position(),
            Position::Step(step) if step.is_skippable(),
        );
        if skippable {
            self.next();
        }
        skippable
    }

    /// Drops the draft and returns to the [`Step::FIRST`].
    fn reset(&self) {
        let draft = {
            let mut state = self.state();
            let external = state.external.take();
            *state = State {
                external,
                ..State::default()
            };
            state.draft.clone()
        };
        (self.on_change)(&draft);
    }
}

impl<S> Wizard<S>
where
    S: Handler<Submission, Ok = job::Id, Err = Traced<SubmitError>>,
{
    /// Confirms the summary submitting the draft.
    ///
    /// Only one [`Submission`] may be in flight at a time. On success the
    /// draft is dropped and the [`Wizard`] returns to the [`Step::FIRST`].
    ///
    /// # Errors
    ///
    /// - If the [`Wizard`] is not on the summary.
    /// - If another [`Submission`] is in flight.
    /// - If the draft is not valid.
    /// - If the [`Submission`] fails.
    pub async fn confirm(&self) -> Result<job::Id, Traced<ConfirmError>> {
        use ConfirmError as E;

        if self.position() != Position::Summary {
            return Err(tracerr::new!(E::NotOnSummary));
        }
        let Some(_guard) = SubmittingGuard::acquire(&self.is_submitting) else {
            return Err(tracerr::new!(E::InProgress));
        };

        let specification = self.draft();
        specification
            .validate()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let id = self
            .submitter
            .execute(Submission {
                specification,
                job_type_id: self.job_type_id,
            })
            .await
            .inspect_err(|e| log::warn!("failed to submit job: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.reset();
        Ok(id)
    }
}

/// Guard holding the in-flight indicator raised until dropped.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self(flag))
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Error of [`Wizard::confirm()`].
#[derive(Debug, Display, Error, From)]
pub enum ConfirmError {
    /// [`Wizard`] is not on the summary.
    #[display("job can be confirmed on the summary only")]
    NotOnSummary,

    /// Another [`Submission`] is in flight.
    #[display("job is being submitted already")]
    InProgress,

    /// Draft is not valid.
    #[display("job specification is invalid: {_0}")]
    #[from]
    Invalid(ValidationError),

    /// [`Submission`] failed.
    #[display("{_0}")]
    #[from]
    Submit(SubmitError),
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use common::Handler;
    use service::domain::{
        customer, job, job_type,
        specification::{
            bill_book::BindingKind, CustomerRef, JobSpecification, Patch,
            ValidationError,
        },
    };
    use tracerr::Traced;

    use super::{ConfirmError, Position, Step, SubmitError, Submission, Wizard};

    #[derive(Debug, Default)]
    struct Recorder {
        calls: AtomicUsize,
        fail: bool,
        submitted: Mutex<Vec<Submission>>,
    }

    impl Handler<Submission> for Arc<Recorder> {
        type Ok = job::Id;
        type Err = Traced<SubmitError>;

        async fn execute(
            &self,
            submission: Submission,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.submitted.lock().unwrap().push(submission);
            tokio::task::yield_now().await;
            if self.fail {
                return Err(tracerr::new!(SubmitError::Rejected {
                    status: 500,
                    code: "SUBSECTION_FAILED".to_owned(),
                    message: "Failed to store laminating of the job".to_owned(),
                }));
            }
            Ok(job::Id::from(42))
        }
    }

    fn wizard(
        recorder: &Arc<Recorder>,
    ) -> (Wizard<Arc<Recorder>>, Arc<Mutex<Vec<JobSpecification>>>) {
        let changes = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&changes);
        let wizard =
            Wizard::new(job_type::Id::from(2), Arc::clone(recorder), move |s| {
                sink.lock().unwrap().push(s.clone());
            });
        (wizard, changes)
    }

    fn complete() -> JobSpecification {
        JobSpecification::default()
            .with(Patch::SetCustomer(Some(CustomerRef::Existing(
                customer::Id::from(7),
            ))))
            .with(Patch::SetJobNumber(job::Number::new("J-7")))
            .with(Patch::SetJobName(job::Name::new("Flyers")))
            .with(Patch::SetQuantity(job::Quantity::new(500)))
            .with(Patch::SetDeliveryDate(Some(
                job::DeliveryDateTime::from_rfc3339("2026-11-02T10:00:00Z")
                    .unwrap(),
            )))
    }

    fn to_summary<S>(wizard: &Wizard<S>) {
        for _ in 0..Step::COUNT {
            wizard.next();
        }
    }

    #[test]
    fn walks_through_steps_to_summary_and_back() {
        let (wizard, _) = wizard(&Arc::default());
        assert_eq!(wizard.position(), Position::Step(Step::FIRST));

        wizard.previous();
        assert_eq!(wizard.position(), Position::Step(Step::FIRST));

        for _ in 1..Step::COUNT {
            wizard.next();
        }
        assert_eq!(wizard.position(), Position::Step(Step::LAST));

        wizard.next();
        assert_eq!(wizard.position(), Position::Summary);
        wizard.next();
        assert_eq!(wizard.position(), Position::Summary);

        wizard.previous();
        assert_eq!(wizard.position(), Position::Step(Step::LAST));
    }

    #[test]
    fn skips_only_skippable_steps() {
        let (wizard, _) = wizard(&Arc::default());

        assert!(!wizard.skip());
        assert_eq!(wizard.position(), Position::Step(Step::FIRST));

        wizard.next();
        assert!(wizard.skip());
        assert_eq!(wizard.position(), Position::Step(Step::Colors));
    }

    #[test]
    fn reports_every_change() {
        let (wizard, changes) = wizard(&Arc::default());

        wizard.apply(Patch::SetJobName(job::Name::new("Flyers")));
        wizard.apply(Patch::SetQuantity(job::Quantity::new(10)));

        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].quantity, None);
        assert_eq!(changes[1].job_name, job::Name::new("Flyers"));
        assert_eq!(changes[1], wizard.draft());
    }

    #[test]
    fn syncs_only_changed_external_specification() {
        let (wizard, changes) = wizard(&Arc::default());
        let external = complete();

        wizard.sync(&external);
        assert_eq!(wizard.draft(), external);

        wizard.apply(Patch::SetJobName(job::Name::new("Letterheads")));
        wizard.sync(&external);
        assert_eq!(wizard.draft().job_name, job::Name::new("Letterheads"));

        assert_eq!(changes.lock().unwrap().len(), 1);
    }

    #[test]
    fn opens_binding_preview() {
        let (wizard, _) = wizard(&Arc::default());

        wizard.apply(Patch::SetBinding(Some(BindingKind::Spiral)));
        let preview = wizard.preview().unwrap();
        assert_eq!(preview.binding, BindingKind::Spiral);
        assert_eq!(preview.template, BindingKind::Spiral.template());

        wizard.close_preview();
        assert_eq!(wizard.preview(), None);
    }

    #[test]
    fn freezes_draft_on_summary() {
        let (wizard, changes) = wizard(&Arc::default());
        wizard.sync(&complete());
        to_summary(&wizard);

        wizard.apply(Patch::SetJobName(job::Name::new("Letterheads")));
        assert_eq!(wizard.draft(), complete());
        assert!(changes.lock().unwrap().is_empty());

        wizard.previous();
        wizard.apply(Patch::SetJobName(job::Name::new("Letterheads")));
        assert_eq!(wizard.draft().job_name, job::Name::new("Letterheads"));
        assert_eq!(changes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ignores_patches_while_submitting() {
        let recorder = Arc::<Recorder>::default();
        let (wizard, changes) = wizard(&recorder);
        wizard.sync(&complete());
        to_summary(&wizard);

        let (id, ()) = futures::join!(wizard.confirm(), async {
            assert!(wizard.is_submitting());
            wizard.previous();
            wizard.apply(Patch::SetJobName(job::Name::new("Letterheads")));
        });

        assert_eq!(id.unwrap(), job::Id::from(42));
        assert_eq!(
            recorder.submitted.lock().unwrap()[0].specification,
            complete(),
        );
        assert!(changes
            .lock()
            .unwrap()
            .iter()
            .all(|s| s.job_name != job::Name::new("Letterheads")));
    }

    #[tokio::test]
    async fn submits_once_when_confirmed_twice() {
        let recorder = Arc::<Recorder>::default();
        let (wizard, changes) = wizard(&recorder);
        wizard.sync(&complete());
        to_summary(&wizard);

        let (first, second) = futures::join!(wizard.confirm(), wizard.confirm());

        assert_eq!(first.unwrap(), job::Id::from(42));
        assert!(matches!(
            second.unwrap_err().into_inner(),
            ConfirmError::InProgress,
        ));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
        assert!(!wizard.is_submitting());

        let submitted = recorder.submitted.lock().unwrap();
        assert_eq!(submitted[0].job_type_id, job_type::Id::from(2));
        assert_eq!(submitted[0].specification, complete());

        assert_eq!(wizard.draft(), JobSpecification::default());
        assert_eq!(wizard.position(), Position::Step(Step::FIRST));
        assert_eq!(
            changes.lock().unwrap().last(),
            Some(&JobSpecification::default()),
        );
    }

    #[tokio::test]
    async fn confirms_only_on_summary() {
        let recorder = Arc::<Recorder>::default();
        let (wizard, _) = wizard(&recorder);
        wizard.sync(&complete());

        let err = wizard.confirm().await.unwrap_err();

        assert!(matches!(err.into_inner(), ConfirmError::NotOnSummary));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validates_before_submitting() {
        let recorder = Arc::<Recorder>::default();
        let (wizard, _) = wizard(&recorder);
        wizard.apply(Patch::SetJobName(job::Name::new("Flyers")));
        to_summary(&wizard);

        let err = wizard.confirm().await.unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ConfirmError::Invalid(ValidationError::MissingCustomer),
        ));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn keeps_draft_on_failure() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let (wizard, _) = wizard(&recorder);
        wizard.sync(&complete());
        to_summary(&wizard);

        let err = wizard.confirm().await.unwrap_err();

        assert!(err.to_string().contains("laminating"));
        assert_eq!(wizard.draft(), complete());
        assert_eq!(wizard.position(), Position::Summary);
        assert!(!wizard.is_submitting());
    }
}
