use std::cell::{Cell, RefCell};

use mediabind_core::{
    Completion, Document, ElementId, HostRegistry, ImmediateScheduler, MediaNode, NotFound,
    Playback, PlaybackState, QueueScheduler, Scheduler, pause, run_now,
};

fn stage() -> Document {
    let mut doc = Document::new();
    doc.insert("player-1", MediaNode::playing());
    doc.insert("player-2", MediaNode::paused());
    doc
}

fn node<'d>(doc: &'d Document, id: &str) -> &'d MediaNode {
    doc.get(id).expect("stage element")
}

#[test]
fn pausing_a_playing_element_succeeds_and_pauses_it() {
    let doc = stage();
    let binding = pause("player-1");

    assert_eq!(run_now(binding.deferred(&doc)), Some(Ok(())));
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Paused);
}

#[test]
fn pausing_a_missing_element_fails_with_its_id() {
    let doc = stage();
    let binding = pause::<MediaNode>("missing-id");

    let outcome = run_now(binding.deferred(&doc));
    assert_eq!(outcome, Some(Err(NotFound::new("missing-id"))));
    assert!(doc.iter().all(|(_, n)| n.pause_calls() == 0));
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Playing);
}

#[test]
fn pausing_an_already_paused_element_still_succeeds() {
    let doc = stage();
    let binding = pause("player-1");

    assert_eq!(run_now(binding.deferred(&doc)), Some(Ok(())));
    assert_eq!(run_now(binding.deferred(&doc)), Some(Ok(())));
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Paused);
    assert_eq!(node(&doc, "player-1").pause_calls(), 2);
}

#[test]
fn building_a_pause_touches_nothing() {
    let doc = stage();
    let _first = pause::<MediaNode>("player-1");
    let _second = pause::<MediaNode>("missing-id");
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Playing);
    assert_eq!(node(&doc, "player-1").pause_calls(), 0);
}

#[test]
fn completion_fires_exactly_once_per_execution() {
    let doc = stage();
    for id in ["player-1", "player-2", "missing-id", ""] {
        let calls = Cell::new(0);
        let outcome = RefCell::new(None);
        pause(id).execute(
            &doc,
            Completion::new(|result| {
                calls.set(calls.get() + 1);
                *outcome.borrow_mut() = Some(result);
            }),
        );
        assert_eq!(calls.get(), 1, "id {id:?}");
        let expected = if doc.get(id).is_some() {
            Ok(())
        } else {
            Err(NotFound::new(id))
        };
        assert_eq!(outcome.into_inner(), Some(expected), "id {id:?}");
    }
}

#[test]
fn queued_pauses_run_on_drain_in_order() {
    let doc = stage();
    let first = pause("player-1");
    let missing = pause("missing-id");
    let second = pause("player-2");

    let mut scheduler = QueueScheduler::new();
    let receipts = [
        scheduler.submit(first.deferred(&doc)),
        scheduler.submit(missing.deferred(&doc)),
        scheduler.submit(second.deferred(&doc)),
    ];
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Playing);

    let report = scheduler.drain();
    assert_eq!(report.executed, 3);
    assert!(report.is_clean());
    assert!(receipts.iter().all(|r| r.deliveries() == 1));
    assert_eq!(receipts[0].outcome(), Some(Ok(())));
    assert_eq!(receipts[1].outcome(), Some(Err(NotFound::new("missing-id"))));
    assert_eq!(receipts[2].outcome(), Some(Ok(())));
    assert_eq!(node(&doc, "player-1").state(), PlaybackState::Paused);
}

#[test]
fn failure_can_be_recovered_by_the_caller() {
    let doc = stage();
    let binding = pause("missing-id");
    let fallback = pause("player-1");

    let task = binding
        .deferred(&doc)
        .on_error(|err: NotFound| {
            assert_eq!(err.id().as_str(), "missing-id");
            fallback.deferred(&doc)
        });

    let mut scheduler = ImmediateScheduler::new();
    let receipt = scheduler.submit(task);
    assert_eq!(receipt.take(), Some(Ok(())));
    assert!(node(&doc, "player-1").state().is_paused());
}

#[test]
fn sequenced_pauses_stop_at_the_first_missing_element() {
    let doc = stage();
    let missing = pause("missing-id");
    let after = pause("player-1");

    let task = missing.deferred(&doc).and_then(|()| after.deferred(&doc));
    assert_eq!(run_now(task), Some(Err(NotFound::new("missing-id"))));
    assert_eq!(node(&doc, "player-1").pause_calls(), 0);
}

#[test]
fn element_removed_before_execution_is_not_found() {
    let mut doc = stage();
    let binding = pause::<MediaNode>("player-1");
    let _ = doc.remove("player-1");
    assert_eq!(binding.perform(&doc), Err(NotFound::new("player-1")));
}

struct Players(Vec<(ElementId, Box<dyn Playback>)>);

impl HostRegistry for Players {
    type Node = dyn Playback;

    fn lookup_by_id(&self, id: &ElementId) -> Option<&(dyn Playback + 'static)> {
        self.0
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, player)| &**player)
    }
}

#[test]
fn pause_works_over_trait_object_hosts() {
    let player: Box<dyn Playback> = Box::new(MediaNode::playing());
    let host = Players(vec![(ElementId::from("tv"), player)]);
    let binding = pause::<dyn Playback>("tv");

    assert_eq!(binding.perform(&host), Ok(()));
    assert_eq!(
        host.lookup_by_id(&ElementId::from("tv")).map(|p| p.state()),
        Some(PlaybackState::Paused)
    );
}
