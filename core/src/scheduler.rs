//! Reference schedulers for deferred computations.
//!
//! Real hosts bring their own event loop; these exist so that applications and
//! tests can drive bindings without one. Both are single-threaded and run each
//! job to completion before starting the next.
//!
//! ```text
//! submit(deferred) -> Receipt      (nothing runs yet for QueueScheduler)
//! drain()          -> DrainReport  (FIFO, one job at a time)
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::completion::Completion;
use crate::deferred::Deferred;

// ============================================================================
// Receipts
// ============================================================================

struct Slot<T, E> {
    outcome: Option<Result<T, E>>,
    deliveries: u32,
}

/// Observer for the outcome of a submitted computation.
///
/// Clones share the same slot.
pub struct Receipt<T, E> {
    slot: Rc<RefCell<Slot<T, E>>>,
}

impl<T, E> Receipt<T, E> {
    fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                outcome: None,
                deliveries: 0,
            })),
        }
    }

    fn completion<'c>(&self) -> Completion<'c, T, E>
    where
        T: 'c,
        E: 'c,
    {
        let slot = Rc::clone(&self.slot);
        Completion::new(move |result| {
            let mut slot = slot.borrow_mut();
            slot.deliveries += 1;
            slot.outcome = Some(result);
        })
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().deliveries > 0
    }

    /// How many times the completion fired. Anything other than 0 (not yet
    /// run, or stalled) or 1 is a broken binding.
    #[must_use]
    pub fn deliveries(&self) -> u32 {
        self.slot.borrow().deliveries
    }

    /// Take the outcome out, leaving the delivery count untouched.
    pub fn take(&self) -> Option<Result<T, E>> {
        self.slot.borrow_mut().outcome.take()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.slot.borrow().outcome.clone()
    }
}

impl<T, E> Clone for Receipt<T, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T, E> fmt::Debug for Receipt<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Receipt")
            .field("deliveries", &slot.deliveries)
            .field("has_outcome", &slot.outcome.is_some())
            .finish()
    }
}

// ============================================================================
// Jobs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Resolved,
    /// The job returned without resolving its completion.
    Stalled,
}

/// A type-erased unit of scheduled work.
pub struct Job<'a> {
    run: Box<dyn FnOnce() -> JobStatus + 'a>,
}

impl<'a> Job<'a> {
    pub fn new(run: impl FnOnce() -> JobStatus + 'a) -> Self {
        Self { run: Box::new(run) }
    }

    /// Wrap a deferred computation, returning the job and a receipt for its outcome.
    pub fn from_deferred<T: 'a, E: 'a>(task: Deferred<'a, T, E>) -> (Self, Receipt<T, E>) {
        let receipt = Receipt::new();
        let observer = receipt.clone();
        let job = Self::new(move || {
            task.run(observer.completion());
            if observer.is_resolved() {
                JobStatus::Resolved
            } else {
                JobStatus::Stalled
            }
        });
        (job, receipt)
    }

    pub fn run(self) -> JobStatus {
        (self.run)()
    }
}

impl fmt::Debug for Job<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").finish_non_exhaustive()
    }
}

// ============================================================================
// Schedulers
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub executed: usize,
    pub stalled: usize,
}

impl DrainReport {
    fn record(&mut self, status: JobStatus) {
        self.executed += 1;
        if status == JobStatus::Stalled {
            self.stalled += 1;
            tracing::warn!("scheduled job finished without resolving its completion");
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stalled == 0
    }
}

/// The capability effect bindings are executed by.
pub trait Scheduler<'a> {
    fn enqueue(&mut self, job: Job<'a>);

    /// Run everything that is pending and report what happened since the last drain.
    fn drain(&mut self) -> DrainReport;

    fn submit<T: 'a, E: 'a>(&mut self, task: Deferred<'a, T, E>) -> Receipt<T, E>
    where
        Self: Sized,
    {
        let (job, receipt) = Job::from_deferred(task);
        self.enqueue(job);
        receipt
    }
}

/// Cooperative FIFO scheduler. Submitted work runs only on [`Scheduler::drain`].
#[derive(Debug, Default)]
pub struct QueueScheduler<'a> {
    queue: VecDeque<Job<'a>>,
}

impl QueueScheduler<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<'a> Scheduler<'a> for QueueScheduler<'a> {
    fn enqueue(&mut self, job: Job<'a>) {
        self.queue.push_back(job);
    }

    fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(job) = self.queue.pop_front() {
            report.record(job.run());
        }
        tracing::debug!(
            executed = report.executed,
            stalled = report.stalled,
            "scheduler drained"
        );
        report
    }
}

/// Runs every job the moment it is enqueued. Useful as a test double.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    report: DrainReport,
}

impl ImmediateScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Scheduler<'a> for ImmediateScheduler {
    fn enqueue(&mut self, job: Job<'a>) {
        self.report.record(job.run());
    }

    fn drain(&mut self) -> DrainReport {
        mem::take(&mut self.report)
    }
}

/// Run a computation on the spot. `None` means it never resolved.
pub fn run_now<T, E>(task: Deferred<'_, T, E>) -> Option<Result<T, E>> {
    let receipt = Receipt::new();
    task.run(receipt.completion());
    receipt.take()
}
