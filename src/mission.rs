//! Training mission catalog and the per-page selection state machine.
//!
//! `Unselected -> Selected -> Loading -> (Loaded | LoadFailed)`. A name
//! missing from the filename table or an unreadable briefing file both land
//! in `LoadFailed` with the same generic user message; the raw error only
//! goes to the log.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::logging::{json_log, obj, v_str, Domain};

pub const MISSIONS: [&str; 4] = [
    "Normal Operation",
    "Cyberattack",
    "Sensor Diagnosis",
    "Maintenance",
];

/// User-visible failure text, shared by every load failure.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load mission information";

pub fn mission_file(name: &str) -> Option<&'static str> {
    match name {
        "Normal Operation" => Some("normal.txt"),
        "Cyberattack" => Some("cyber_attack.txt"),
        "Sensor Diagnosis" => Some("sensor_diagnosis.txt"),
        "Maintenance" => Some("maintenance.txt"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionState {
    Unselected,
    Selected { name: String },
    Loading { name: String },
    Loaded { name: String, briefing: String },
    LoadFailed { name: String, message: String },
}

impl MissionState {
    pub fn select(name: &str) -> Self {
        MissionState::Selected { name: name.to_string() }
    }

    /// `Selected -> Loading`; any other state is unchanged.
    pub fn start_loading(self) -> Self {
        match self {
            MissionState::Selected { name } => MissionState::Loading { name },
            other => other,
        }
    }

    /// `Loading -> Loaded | LoadFailed`; any other state is unchanged.
    pub fn finish_loading(self, outcome: Result<String>) -> Self {
        match self {
            MissionState::Loading { name } => match outcome {
                Ok(briefing) => MissionState::Loaded { name, briefing },
                Err(err) => {
                    json_log(
                        Domain::Mission,
                        "briefing_load_failed",
                        obj(&[("mission", v_str(&name)), ("error", v_str(&err.to_string()))]),
                    );
                    MissionState::LoadFailed { name, message: LOAD_FAILED_MESSAGE.to_string() }
                }
            },
            other => other,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MissionState::Unselected => None,
            MissionState::Selected { name }
            | MissionState::Loading { name }
            | MissionState::Loaded { name, .. }
            | MissionState::LoadFailed { name, .. } => Some(name),
        }
    }
}

/// Drive the state machine through a full load of one mission's briefing.
pub async fn load_mission(text_dir: &Path, name: &str) -> MissionState {
    let state = MissionState::select(name).start_loading();
    let outcome = match mission_file(name) {
        None => Err(anyhow!("no briefing file mapped for mission {:?}", name)),
        Some(file) => tokio::fs::read_to_string(text_dir.join(file))
            .await
            .map_err(|err| anyhow!("read {}: {}", file, err)),
    };
    state.finish_loading(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_table_is_fixed() {
        assert_eq!(mission_file("Cyberattack"), Some("cyber_attack.txt"));
        assert_eq!(mission_file("Normal Operation"), Some("normal.txt"));
        assert_eq!(mission_file("Sensor Diagnosis"), Some("sensor_diagnosis.txt"));
        assert_eq!(mission_file("Maintenance"), Some("maintenance.txt"));
        assert_eq!(mission_file("Sabotage"), None);
    }

    #[test]
    fn happy_path_transitions() {
        let state = MissionState::select("Maintenance")
            .start_loading()
            .finish_loading(Ok("briefing text".to_string()));
        assert_eq!(
            state,
            MissionState::Loaded {
                name: "Maintenance".to_string(),
                briefing: "briefing text".to_string(),
            }
        );
    }

    #[test]
    fn failed_load_keeps_generic_message() {
        let state = MissionState::select("Maintenance")
            .start_loading()
            .finish_loading(Err(anyhow!("disk on fire")));
        match state {
            MissionState::LoadFailed { message, .. } => assert_eq!(message, LOAD_FAILED_MESSAGE),
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn finish_is_a_noop_outside_loading() {
        let state = MissionState::Unselected.finish_loading(Ok("x".to_string()));
        assert_eq!(state, MissionState::Unselected);
    }

    #[tokio::test]
    async fn unknown_mission_fails_without_touching_disk() {
        // Directory does not exist; the name lookup must fail first.
        let state = load_mission(Path::new("/nonexistent"), "Sabotage").await;
        match state {
            MissionState::LoadFailed { name, message } => {
                assert_eq!(name, "Sabotage");
                assert_eq!(message, LOAD_FAILED_MESSAGE);
            }
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }
}
