//! Static lookup from anomaly type to operator-facing text.
//!
//! Resolution order: exact type, then severity, then a generic fallback
//! carrying the raw type string. The tables are fixed for the process
//! lifetime; the analytics service owns the vocabulary.

use crate::model::{Anomaly, Severity};

fn by_type(kind: &str) -> Option<&'static str> {
    let text = match kind {
        "HIGH_TEMP" => "Spindle temperature is above the safe operating range.",
        "TEMP_Z_SPIKE" => "Spindle temperature spiked well outside its recent trend.",
        "HIGH_VIBRATION" => "Vibration level exceeds the allowed threshold, check tool wear and mounting.",
        "VIBRATION_Z_SPIKE" => "Vibration spiked well outside its recent trend.",
        "HIGH_POWER_DRAW" => "Power draw exceeds the allowed threshold, possible overload or tampering.",
        "POWER_Z_SPIKE" => "Power draw spiked well outside its recent trend.",
        "MINOR_POSITION_DRIFT" => "Position encoder drifting from the expected toolpath, schedule recalibration.",
        "MAJOR_POSITION_DRIFT" => "Position encoder far off the expected toolpath, stop and inspect the axis drives.",
        "REPEATED_INSPECTION_FAILS" => "Several consecutive parts failed inspection, halt the batch.",
        "MULTIPLE_ANOMALIES" => "Multiple anomalies reported on the same machine this cycle.",
        _ => return None,
    };
    Some(text)
}

fn by_severity(severity: Severity) -> Option<&'static str> {
    match severity {
        Severity::Critical => Some("Critical fault reported, stop the line and inspect the machine."),
        Severity::Warning => Some("Reading outside the normal operating band, keep the machine under watch."),
        Severity::Unknown => None,
    }
}

pub fn describe(anomaly: &Anomaly) -> String {
    if let Some(text) = by_type(&anomaly.kind) {
        return text.to_string();
    }
    if let Some(text) = by_severity(anomaly.severity) {
        return text.to_string();
    }
    format!("Unknown anomaly: {}", anomaly.kind)
}

pub fn describe_all(anomalies: &[Anomaly]) -> Vec<String> {
    anomalies.iter().map(describe).collect()
}
