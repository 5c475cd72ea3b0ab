//! Effect bindings: `{ id, action }` descriptors that run against a registry.
//!
//! A [`Binding`] is inert until executed. Each execution looks the element up,
//! runs the action on it if present, and resolves its completion exactly once:
//!
//! ```text
//! Constructed -> Executing -> Resolved(Ok(v))            element found, action ran
//!                          -> Resolved(Err(NotFound(id))) element missing, action skipped
//! ```
//!
//! Executions are independent; a binding can be executed again and describes
//! the same action every time.

use std::fmt;
use std::rc::Rc;

use mediabind_types::{ActionResult, ElementId, NotFound};

use crate::completion::Completion;
use crate::deferred::Deferred;
use crate::locator::{HostRegistry, locate};

pub struct Binding<N: ?Sized, V> {
    id: ElementId,
    action: Rc<dyn Fn(&N) -> V>,
}

/// Describe `action` on the element named `id`. Nothing runs until execution.
pub fn bind<N: ?Sized, V>(
    id: impl Into<ElementId>,
    action: impl Fn(&N) -> V + 'static,
) -> Binding<N, V> {
    Binding {
        id: id.into(),
        action: Rc::new(action),
    }
}

impl<N: ?Sized, V> Binding<N, V> {
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Run once against `registry`, resolving `done` before returning.
    pub fn execute<R>(&self, registry: &R, done: Completion<'_, V, NotFound>)
    where
        R: HostRegistry<Node = N> + ?Sized,
    {
        done.resolve(self.perform(registry));
    }

    /// Run once against `registry` and hand back the outcome directly.
    pub fn perform<R>(&self, registry: &R) -> ActionResult<V>
    where
        R: HostRegistry<Node = N> + ?Sized,
    {
        let Some(node) = locate(registry, &self.id) else {
            tracing::debug!(id = %self.id, "binding target missing");
            return Err(NotFound::new(self.id.clone()));
        };
        let value = (self.action)(node);
        tracing::debug!(id = %self.id, "binding action ran");
        Ok(value)
    }

    /// Lift onto the scheduler's `binding` primitive, borrowing this descriptor.
    pub fn deferred<'a, R>(&'a self, registry: &'a R) -> Deferred<'a, V, NotFound>
    where
        R: HostRegistry<Node = N> + ?Sized,
        V: 'a,
    {
        Deferred::binding(move |done| self.execute(registry, done))
    }

    /// Lift onto the scheduler's `binding` primitive, taking ownership.
    pub fn into_deferred<'a, R>(self, registry: &'a R) -> Deferred<'a, V, NotFound>
    where
        R: HostRegistry<Node = N> + ?Sized,
        N: 'a,
        V: 'a,
    {
        Deferred::binding(move |done| self.execute(registry, done))
    }
}

impl<N: ?Sized, V> Clone for Binding<N, V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            action: Rc::clone(&self.action),
        }
    }
}

impl<N: ?Sized, V> fmt::Debug for Binding<N, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
