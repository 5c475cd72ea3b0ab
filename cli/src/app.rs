//! Command bodies, kept free of process concerns so they can be tested directly.

use std::collections::HashSet;
use std::path::Path;

use mediabind_config::{ConfigError, StageConfig};
use mediabind_core::{
    Binding, Document, MediaNode, NotFound, Playback, QueueScheduler, Scheduler, pause,
};

/// Read the stage at `path`, or the default stage if no path is given.
///
/// An explicit path must exist. A missing default stage is an empty stage.
pub fn load_stage(path: Option<&Path>) -> Result<StageConfig, ConfigError> {
    match path {
        Some(path) => StageConfig::load_from(path),
        None => Ok(StageConfig::load()?.unwrap_or_default()),
    }
}

/// Build the host document. A repeated id replaces the earlier element.
pub fn build_document(stage: &StageConfig) -> Document {
    let mut seen = HashSet::new();
    let mut document = Document::new();
    for (id, state) in stage.element_states() {
        if !seen.insert(id.clone()) {
            tracing::warn!(%id, "Duplicate element id in stage; later entry wins");
        }
        document.insert(id, MediaNode::new(state));
    }
    document
}

#[derive(Debug, Default)]
pub struct PauseSummary {
    pub lines: Vec<String>,
    pub missing: usize,
}

/// Submit one pause per id, drain the scheduler, and describe each outcome.
pub fn pause_all(document: &Document, ids: &[String]) -> PauseSummary {
    let bindings: Vec<Binding<MediaNode, ()>> = ids.iter().map(|id| pause(id.as_str())).collect();

    let mut scheduler = QueueScheduler::new();
    let receipts: Vec<_> = bindings
        .iter()
        .map(|binding| scheduler.submit(binding.deferred(document)))
        .collect();

    let report = scheduler.drain();
    if !report.is_clean() {
        tracing::warn!(stalled = report.stalled, "Some pauses never completed");
    }

    let mut summary = PauseSummary::default();
    for (binding, receipt) in bindings.iter().zip(&receipts) {
        let line = match receipt.take() {
            Some(Ok(())) => format!("paused {}", binding.id()),
            Some(Err(NotFound { id })) => {
                summary.missing += 1;
                format!("not found: {id}")
            }
            None => format!("stalled: {}", binding.id()),
        };
        summary.lines.push(line);
    }
    summary
}

/// One `id<TAB>state` line per element, in id order.
pub fn render_states(document: &Document) -> Vec<String> {
    document
        .iter()
        .map(|(id, node)| format!("{id}\t{}", node.state()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mediabind_config::StageConfig;
    use mediabind_core::{Playback, PlaybackState};

    use super::{build_document, load_stage, pause_all, render_states};

    fn stage(toml_str: &str) -> StageConfig {
        toml::from_str(toml_str).unwrap()
    }

    const TWO_PLAYERS: &str = r#"
[[element]]
id = "player-1"

[[element]]
id = "player-2"
state = "paused"
"#;

    #[test]
    fn pause_reports_each_id_in_order() {
        let document = build_document(&stage(TWO_PLAYERS));
        let ids = ["missing-id", "player-1", "player-2"].map(String::from);

        let summary = pause_all(&document, &ids);
        assert_eq!(
            summary.lines,
            vec!["not found: missing-id", "paused player-1", "paused player-2"]
        );
        assert_eq!(summary.missing, 1);
        assert!(
            document
                .get("player-1")
                .is_some_and(|n| n.state() == PlaybackState::Paused)
        );
    }

    #[test]
    fn render_lists_states_sorted_by_id() {
        let document = build_document(&stage(TWO_PLAYERS));
        assert_eq!(
            render_states(&document),
            vec!["player-1\tplaying", "player-2\tpaused"]
        );
    }

    #[test]
    fn duplicate_ids_keep_the_last_entry() {
        let document = build_document(&stage(
            "[[element]]\nid = \"v\"\n\n[[element]]\nid = \"v\"\nstate = \"paused\"\n",
        ));
        assert_eq!(document.len(), 1);
        assert!(document.get("v").is_some_and(|n| n.state().is_paused()));
    }

    #[test]
    fn explicit_stage_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_stage(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn explicit_stage_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.toml");
        fs::write(&path, TWO_PLAYERS).unwrap();

        let loaded = load_stage(Some(path.as_path())).unwrap();
        assert_eq!(loaded.elements.len(), 2);
    }
}
