//! Single-shot completion handler.
//!
//! A [`Completion`] is the callback a scheduler hands to a deferred computation.
//! It is linear: resolving it consumes it, so it cannot fire twice. Dropping it
//! unresolved leaves whoever waits on it stalled, which is logged at error level.

use std::fmt;

/// The callback side of a deferred computation.
///
/// Resolving takes `self`, so a second resolution is a compile error:
///
/// ```compile_fail
/// use mediabind_core::Completion;
///
/// let done = Completion::<(), ()>::new(|_| {});
/// done.succeed(());
/// done.succeed(());
/// ```
#[must_use = "a Completion must be resolved exactly once"]
pub struct Completion<'a, T, E> {
    callback: Option<Box<dyn FnOnce(Result<T, E>) + 'a>>,
}

impl<'a, T, E> Completion<'a, T, E> {
    pub fn new(callback: impl FnOnce(Result<T, E>) + 'a) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Deliver the outcome. Consumes the completion.
    pub fn resolve(mut self, result: Result<T, E>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }

    pub fn succeed(self, value: T) {
        self.resolve(Ok(value));
    }

    pub fn fail(self, error: E) {
        self.resolve(Err(error));
    }
}

impl<T, E> Drop for Completion<'_, T, E> {
    fn drop(&mut self) {
        if self.callback.is_some() {
            tracing::error!("completion dropped without being resolved; its waiter will never run");
        }
    }
}

impl<T, E> fmt::Debug for Completion<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::Completion;

    #[test]
    fn succeed_delivers_ok() {
        let seen = RefCell::new(None);
        Completion::<u8, &str>::new(|r| *seen.borrow_mut() = Some(r)).succeed(7);
        assert_eq!(seen.into_inner(), Some(Ok(7)));
    }

    #[test]
    fn fail_delivers_err() {
        let seen = RefCell::new(None);
        Completion::<u8, &str>::new(|r| *seen.borrow_mut() = Some(r)).fail("nope");
        assert_eq!(seen.into_inner(), Some(Err("nope")));
    }

    #[test]
    fn dropping_unresolved_never_calls_back() {
        let calls = Cell::new(0);
        let done = Completion::<(), ()>::new(|_| calls.set(calls.get() + 1));
        drop(done);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn debug_reports_pending() {
        let done = Completion::<(), ()>::new(|_| {});
        assert_eq!(format!("{done:?}"), "Completion { pending: true }");
        done.succeed(());
    }
}
