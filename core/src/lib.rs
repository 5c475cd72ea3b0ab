//! Effect binding bridge for host-managed media elements.
//!
//! Application code describes an action on an element by id ([`pause`],
//! [`bind`]); a scheduler later executes that description against a host
//! registry, and the outcome arrives exactly once through a [`Completion`]:
//!
//! ```text
//! pause(id) -> Binding -> Deferred -> Scheduler::drain()
//!                                        |
//!                                        v
//!                 locate(id) ? action(node) -> Ok(v) : Err(NotFound(id))
//! ```
//!
//! ```
//! use mediabind_core::{Document, MediaNode, Playback, QueueScheduler, Scheduler, pause};
//!
//! let mut doc = Document::new();
//! doc.insert("player-1", MediaNode::playing());
//!
//! let binding = pause("player-1");
//! let mut scheduler = QueueScheduler::new();
//! let receipt = scheduler.submit(binding.deferred(&doc));
//! scheduler.drain();
//!
//! assert_eq!(receipt.take(), Some(Ok(())));
//! assert!(doc.get("player-1").is_some_and(|n| n.state().is_paused()));
//! ```

mod binding;
mod completion;
mod deferred;
pub mod host;
mod locator;
mod media;
pub mod scheduler;

pub use binding::{Binding, bind};
pub use completion::Completion;
pub use deferred::Deferred;
pub use host::{Document, MediaNode};
pub use locator::{HostRegistry, locate};
pub use media::{Playback, pause};
pub use scheduler::{
    DrainReport, ImmediateScheduler, Job, JobStatus, QueueScheduler, Receipt, Scheduler, run_now,
};

pub use mediabind_types::{ActionResult, ElementId, NotFound, PlaybackState};
