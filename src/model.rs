//! Wire types for the two factory services.
//!
//! The analytics service reports anomaly alerts per production cycle; the
//! simulator reports raw machine telemetry. Both payloads are dynamic-shape
//! JSON, so every machine-specific field is optional and telemetry records
//! carry explicit merge semantics instead of ad hoc property copying.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Glyph fill used on the factory map.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Critical => "#e03131",
            Severity::Warning => "#f59f00",
            Severity::Unknown => "#868e96",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
}

impl Anomaly {
    pub fn new(kind: &str, severity: Severity) -> Self {
        Self { kind: kind.to_string(), severity }
    }
}

/// One aggregated alert from the analytics service. The alerts endpoint
/// returns these oldest to newest; the last element is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub alert_type: String,
    pub machine: String,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub cycle_id: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

/// Partial machine telemetry from the simulator's run-cycle endpoint.
/// Which fields are present depends on the machine that produced the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub machine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spindle_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_draw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robotic_arm_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conveyor_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_confidence: Option<f64>,
}

impl TelemetryRecord {
    /// Fill fields absent here from `other`. Present fields are never
    /// overwritten, so folding records in sequence order gives
    /// first-seen-wins semantics.
    pub fn merge_missing(&mut self, other: &TelemetryRecord) {
        if self.cycle_id.is_none() {
            self.cycle_id = other.cycle_id;
        }
        if self.timestamp.is_none() {
            self.timestamp = other.timestamp;
        }
        if self.operation.is_none() {
            self.operation = other.operation.clone();
        }
        if self.tool_id.is_none() {
            self.tool_id = other.tool_id;
        }
        if self.spindle_temp.is_none() {
            self.spindle_temp = other.spindle_temp;
        }
        if self.vibration.is_none() {
            self.vibration = other.vibration;
        }
        if self.power_draw.is_none() {
            self.power_draw = other.power_draw;
        }
        if self.position.is_none() {
            self.position = other.position;
        }
        if self.inspection.is_none() {
            self.inspection = other.inspection.clone();
        }
        if self.robotic_arm_task.is_none() {
            self.robotic_arm_task = other.robotic_arm_task.clone();
        }
        if self.conveyor_position.is_none() {
            self.conveyor_position = other.conveyor_position.clone();
        }
        if self.part_id.is_none() {
            self.part_id = other.part_id.clone();
        }
        if self.inspection_result.is_none() {
            self.inspection_result = other.inspection_result.clone();
        }
        if self.inspection_confidence.is_none() {
            self.inspection_confidence = other.inspection_confidence;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_known_and_unknown() {
        let crit: Severity = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(crit, Severity::Critical);
        let warn: Severity = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(warn, Severity::Warning);
        let odd: Severity = serde_json::from_str("\"INFO\"").unwrap();
        assert_eq!(odd, Severity::Unknown);
        assert_eq!(odd.color(), "#868e96");
    }

    #[test]
    fn alert_decodes_analytics_payload() {
        let body = r#"[{
            "alert_type": "MULTIPLE_ANOMALIES",
            "machine": "CNC_Mill_1",
            "anomalies": [
                {"type": "HIGH_TEMP", "severity": "CRITICAL"},
                {"type": "HIGH_VIBRATION", "severity": "WARNING"}
            ],
            "cycle_id": 7,
            "timestamp": 1754400000.25
        }]"#;
        let alerts: Vec<Alert> = serde_json::from_str(body).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].cycle_id, Some(7));
        assert_eq!(alerts[0].anomalies[0].kind, "HIGH_TEMP");
        assert_eq!(alerts[0].anomalies[1].severity, Severity::Warning);
    }

    #[test]
    fn alert_tolerates_missing_optionals() {
        let body = r#"[{"alert_type": "HIGH_TEMP", "machine": "CNC_Mill_1"}]"#;
        let alerts: Vec<Alert> = serde_json::from_str(body).unwrap();
        assert!(alerts[0].anomalies.is_empty());
        assert_eq!(alerts[0].cycle_id, None);
    }

    #[test]
    fn merge_missing_is_first_seen_wins() {
        let mut target = TelemetryRecord {
            machine: "CNC_Mill_1".to_string(),
            spindle_temp: Some(82.5),
            ..Default::default()
        };
        let arm = TelemetryRecord {
            machine: "Robotic_Arm_1".to_string(),
            spindle_temp: Some(999.0),
            robotic_arm_task: Some("load_material".to_string()),
            ..Default::default()
        };
        let conveyor = TelemetryRecord {
            machine: "Conveyor_1".to_string(),
            robotic_arm_task: Some("idle".to_string()),
            part_id: Some("PART-1007".to_string()),
            ..Default::default()
        };
        target.merge_missing(&arm);
        target.merge_missing(&conveyor);

        // Present fields survive, absent fields come from the first carrier.
        assert_eq!(target.spindle_temp, Some(82.5));
        assert_eq!(target.robotic_arm_task.as_deref(), Some("load_material"));
        assert_eq!(target.part_id.as_deref(), Some("PART-1007"));
    }

    #[test]
    fn telemetry_decodes_position_axes() {
        let body = r#"{"machine": "CNC_Mill_1", "position": {"X": 50.0, "Y": 30.0, "Z": 10.0}}"#;
        let rec: TelemetryRecord = serde_json::from_str(body).unwrap();
        let pos = rec.position.unwrap();
        assert_eq!(pos.x, 50.0);
        assert_eq!(pos.z, 10.0);
    }
}
