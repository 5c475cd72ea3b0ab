//! In-memory host: a document of media nodes addressable by id.
//!
//! Stands in for a real host environment in the CLI and in tests.

use std::cell::Cell;
use std::collections::BTreeMap;

use mediabind_types::{ElementId, PlaybackState};

use crate::locator::HostRegistry;
use crate::media::Playback;

#[derive(Debug, Default)]
pub struct MediaNode {
    state: Cell<PlaybackState>,
    pause_calls: Cell<u32>,
}

impl MediaNode {
    #[must_use]
    pub fn new(state: PlaybackState) -> Self {
        Self {
            state: Cell::new(state),
            pause_calls: Cell::new(0),
        }
    }

    #[must_use]
    pub fn playing() -> Self {
        Self::new(PlaybackState::Playing)
    }

    #[must_use]
    pub fn paused() -> Self {
        Self::new(PlaybackState::Paused)
    }

    /// How many times `pause` has been called, including redundant calls.
    #[must_use]
    pub fn pause_calls(&self) -> u32 {
        self.pause_calls.get()
    }
}

impl Playback for MediaNode {
    fn pause(&self) {
        self.pause_calls.set(self.pause_calls.get() + 1);
        if self.state.replace(PlaybackState::Paused).is_paused() {
            tracing::trace!("pause on an already paused node");
        }
    }

    fn state(&self) -> PlaybackState {
        self.state.get()
    }
}

/// Id-keyed collection of media nodes. Iterates in id order.
#[derive(Debug, Default)]
pub struct Document {
    nodes: BTreeMap<ElementId, MediaNode>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `id`, returning whatever was there before.
    pub fn insert(&mut self, id: impl Into<ElementId>, node: MediaNode) -> Option<MediaNode> {
        self.nodes.insert(id.into(), node)
    }

    pub fn remove(&mut self, id: &str) -> Option<MediaNode> {
        self.nodes.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MediaNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &MediaNode)> {
        self.nodes.iter()
    }
}

impl<I: Into<ElementId>> FromIterator<(I, PlaybackState)> for Document {
    fn from_iter<T: IntoIterator<Item = (I, PlaybackState)>>(iter: T) -> Self {
        Self {
            nodes: iter
                .into_iter()
                .map(|(id, state)| (id.into(), MediaNode::new(state)))
                .collect(),
        }
    }
}

impl HostRegistry for Document {
    type Node = MediaNode;

    fn lookup_by_id(&self, id: &ElementId) -> Option<&MediaNode> {
        self.nodes.get(id)
    }
}
