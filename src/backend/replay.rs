//! Deterministic canned backend for offline demos and manual testing.
//!
//! Cycles advance on every alerts poll; the anomaly mix rotates so the map
//! exercises render, dedup (two polls per cycle) and the empty-clear path
//! without either factory service running.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use super::Backend;
use crate::model::{Alert, Anomaly, Position, Severity, TelemetryRecord};

pub struct ReplayBackend {
    polls: AtomicU64,
}

impl ReplayBackend {
    pub fn new() -> Self {
        Self { polls: AtomicU64::new(0) }
    }

    fn anomalies_for(cycle: u64) -> Vec<Anomaly> {
        match cycle % 4 {
            0 => vec![
                Anomaly::new("HIGH_TEMP", Severity::Critical),
                Anomaly::new("HIGH_VIBRATION", Severity::Warning),
            ],
            1 => vec![Anomaly::new("HIGH_POWER_DRAW", Severity::Warning)],
            2 => vec![
                Anomaly::new("MINOR_POSITION_DRIFT", Severity::Warning),
                Anomaly::new("REPEATED_INSPECTION_FAILS", Severity::Critical),
                Anomaly::new("TEMP_Z_SPIKE", Severity::Warning),
            ],
            _ => Vec::new(),
        }
    }
}

impl Default for ReplayBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for ReplayBackend {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        // Two polls see the same cycle, so the dedup gate gets exercised.
        let cycle = self.polls.fetch_add(1, Ordering::Relaxed) / 2;
        let anomalies = Self::anomalies_for(cycle);
        if anomalies.is_empty() {
            return Ok(Vec::new());
        }
        let alert_type = if anomalies.len() > 1 {
            "MULTIPLE_ANOMALIES".to_string()
        } else {
            anomalies[0].kind.clone()
        };
        Ok(vec![Alert {
            alert_type,
            machine: "CNC_Mill_1".to_string(),
            anomalies,
            cycle_id: Some(cycle),
            timestamp: None,
        }])
    }

    async fn run_cycle(&self) -> Result<Vec<TelemetryRecord>> {
        Ok(vec![
            TelemetryRecord {
                machine: "CNC_Mill_1".to_string(),
                cycle_id: Some(1),
                operation: Some("cutting".to_string()),
                tool_id: Some(2),
                spindle_temp: Some(82.5),
                vibration: Some(1.1),
                power_draw: Some(310.2),
                position: Some(Position { x: 50.0, y: 30.0, z: 10.0 }),
                inspection: Some("PASS".to_string()),
                ..Default::default()
            },
            TelemetryRecord {
                machine: "Robotic_Arm_1".to_string(),
                cycle_id: Some(1),
                robotic_arm_task: Some("load_material".to_string()),
                ..Default::default()
            },
            TelemetryRecord {
                machine: "Conveyor_1".to_string(),
                cycle_id: Some(1),
                conveyor_position: Some("Station B".to_string()),
                part_id: Some("PART-1001".to_string()),
                ..Default::default()
            },
            TelemetryRecord {
                machine: "Inspection_Station".to_string(),
                cycle_id: Some(1),
                inspection_result: Some("PASS".to_string()),
                inspection_confidence: Some(0.93),
                ..Default::default()
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn consecutive_polls_repeat_a_cycle() {
        let backend = ReplayBackend::new();
        let first = backend.fetch_alerts().await.unwrap();
        let second = backend.fetch_alerts().await.unwrap();
        assert_eq!(first.last().unwrap().cycle_id, second.last().unwrap().cycle_id);
        let third = backend.fetch_alerts().await.unwrap();
        assert_ne!(first.last().unwrap().cycle_id, third.last().unwrap().cycle_id);
    }

    #[tokio::test]
    async fn run_cycle_covers_all_machines() {
        let backend = ReplayBackend::new();
        let records = backend.run_cycle().await.unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().any(|r| r.machine.contains("CNC")));
    }
}
