//! Run-cycle panel: pick the interesting machine, merge stray fields,
//! classify the known readings into bands.

use anyhow::{anyhow, Result};

use crate::backend::Backend;
use crate::classify::{inspection_band, power_draw_band, spindle_temp_band, vibration_band, Band};
use crate::model::TelemetryRecord;

/// Merged record plus the band classification for each known reading.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub record: TelemetryRecord,
    pub bands: Vec<(&'static str, Band)>,
}

impl CycleReport {
    pub fn build(record: TelemetryRecord) -> Self {
        let mut bands = Vec::new();
        if let Some(temp) = record.spindle_temp {
            bands.push(("spindle_temp", spindle_temp_band(temp)));
        }
        if let Some(vib) = record.vibration {
            bands.push(("vibration", vibration_band(vib)));
        }
        if let Some(power) = record.power_draw {
            bands.push(("power_draw", power_draw_band(power)));
        }
        if let Some(verdict) = record.inspection.as_deref() {
            bands.push(("inspection", inspection_band(verdict)));
        }
        Self { record, bands }
    }
}

/// Select the record whose machine name contains `machine_filter`, then fill
/// its missing fields from the rest of the sequence, first seen wins.
pub fn merge_cycle(records: &[TelemetryRecord], machine_filter: &str) -> Option<TelemetryRecord> {
    let idx = records.iter().position(|r| r.machine.contains(machine_filter))?;
    let mut merged = records[idx].clone();
    for (i, other) in records.iter().enumerate() {
        if i == idx {
            continue;
        }
        merged.merge_missing(other);
    }
    Some(merged)
}

pub async fn run_cycle_report(backend: &dyn Backend, machine_filter: &str) -> Result<CycleReport> {
    let records = backend.run_cycle().await?;
    let merged = merge_cycle(&records, machine_filter)
        .ok_or_else(|| anyhow!("no record matched machine filter {:?}", machine_filter))?;
    Ok(CycleReport::build(merged))
}
