//! Core domain types for mediabind.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod ids;
mod playback;

pub use ids::ElementId;
pub use playback::PlaybackState;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Effect Errors
// ============================================================================

/// No live host element exists under `id` at the moment the action was attempted.
///
/// This is the only failure an effect binding reports. It travels on the
/// failure channel of the completion; it is never raised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("no element with id \"{id}\"")]
pub struct NotFound {
    pub id: ElementId,
}

impl NotFound {
    #[must_use]
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }
}

/// Result of running an effect against a host element.
pub type ActionResult<V> = Result<V, NotFound>;
