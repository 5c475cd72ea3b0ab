//! Boundary: resolves element ids against the host's registry.
//!
//! Absence is an ordinary outcome here, not an error. The returned reference
//! borrows the registry, so it cannot outlive the lookup's caller.

use mediabind_types::ElementId;

/// A host-owned table of live elements, keyed by id.
pub trait HostRegistry {
    type Node: ?Sized;

    fn lookup_by_id(&self, id: &ElementId) -> Option<&Self::Node>;
}

impl<R: HostRegistry + ?Sized> HostRegistry for &R {
    type Node = R::Node;

    fn lookup_by_id(&self, id: &ElementId) -> Option<&Self::Node> {
        (**self).lookup_by_id(id)
    }
}

/// Resolve `id` to the element currently registered under it.
pub fn locate<'r, R>(registry: &'r R, id: &ElementId) -> Option<&'r R::Node>
where
    R: HostRegistry + ?Sized,
{
    let node = registry.lookup_by_id(id);
    tracing::trace!(%id, found = node.is_some(), "element lookup");
    node
}
