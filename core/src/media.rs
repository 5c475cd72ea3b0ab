//! Media operations exposed to application code.

use mediabind_types::{ElementId, PlaybackState};

use crate::binding::{Binding, bind};

/// A host element that can be paused.
///
/// Methods take `&self`: hosts mutate their elements through shared handles,
/// the way a document hands out node references.
pub trait Playback {
    /// Stop playback. Pausing an already paused element changes nothing.
    fn pause(&self);

    fn state(&self) -> PlaybackState;
}

/// Describe pausing the element named `id`.
///
/// Executing the binding yields `Ok(())` once the element is paused, or
/// `Err(NotFound(id))` if no such element exists at that moment.
pub fn pause<N>(id: impl Into<ElementId>) -> Binding<N, ()>
where
    N: Playback + ?Sized + 'static,
{
    bind(id, |node: &N| node.pause())
}
