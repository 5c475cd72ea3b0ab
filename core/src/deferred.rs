//! Deferred computations and the primitives that build them.
//!
//! A [`Deferred`] describes work that, once run with a [`Completion`], resolves
//! it exactly once. Nothing happens until [`Deferred::run`] is called, which is
//! the scheduler's job. The three constructors mirror the primitives a
//! scheduler exposes to effect bindings: [`Deferred::binding`],
//! [`Deferred::succeed`] and [`Deferred::fail`].

use std::fmt;

use crate::completion::Completion;

type Executor<'a, T, E> = Box<dyn for<'c> FnOnce(Completion<'c, T, E>) + 'a>;

#[must_use = "a Deferred does nothing until it is run"]
pub struct Deferred<'a, T, E> {
    executor: Executor<'a, T, E>,
}

impl<'a, T: 'a, E: 'a> Deferred<'a, T, E> {
    /// Wrap an executor that receives the completion and must resolve it.
    pub fn binding(executor: impl for<'c> FnOnce(Completion<'c, T, E>) + 'a) -> Self {
        Self {
            executor: Box::new(executor),
        }
    }

    pub fn succeed(value: T) -> Self {
        Self::binding(move |done| done.succeed(value))
    }

    pub fn fail(error: E) -> Self {
        Self::binding(move |done| done.fail(error))
    }

    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> Deferred<'a, U, E> {
        Deferred::binding(move |done| {
            self.run(Completion::new(move |result: Result<T, E>| {
                done.resolve(result.map(f));
            }));
        })
    }

    pub fn map_err<F: 'a>(self, f: impl FnOnce(E) -> F + 'a) -> Deferred<'a, T, F> {
        Deferred::binding(move |done| {
            self.run(Completion::new(move |result: Result<T, E>| {
                done.resolve(result.map_err(f));
            }));
        })
    }

    /// Sequence: on success, run the computation `f` builds from the value.
    /// A failure skips `f` and propagates unchanged.
    pub fn and_then<U: 'a>(
        self,
        f: impl FnOnce(T) -> Deferred<'a, U, E> + 'a,
    ) -> Deferred<'a, U, E> {
        Deferred::binding(move |done| {
            self.run(Completion::new(move |result: Result<T, E>| match result {
                Ok(value) => f(value).run(done),
                Err(error) => done.fail(error),
            }));
        })
    }

    /// Recover: on failure, run the computation `f` builds from the error.
    pub fn on_error<F: 'a>(
        self,
        f: impl FnOnce(E) -> Deferred<'a, T, F> + 'a,
    ) -> Deferred<'a, T, F> {
        Deferred::binding(move |done| {
            self.run(Completion::new(move |result: Result<T, E>| match result {
                Ok(value) => done.succeed(value),
                Err(error) => f(error).run(done),
            }));
        })
    }
}

impl<T, E> Deferred<'_, T, E> {
    /// Execute, handing `done` to the executor. The completion cannot escape
    /// this call, so it is resolved (or dropped) before `run` returns.
    pub fn run(self, done: Completion<'_, T, E>) {
        (self.executor)(done);
    }
}

impl<T, E> fmt::Debug for Deferred<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}
