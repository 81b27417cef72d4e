//! Live factory map view state.
//!
//! Owns the dedup gate and the currently rendered scene. All state derives
//! from the latest alert record; nothing accumulates across polls.

use crate::descriptions::describe_all;
use crate::model::Alert;
use crate::render::MapScene;
use crate::state::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapUpdate {
    /// Payload was empty and rendered state was dropped.
    Cleared,
    /// Dedup gate held: same cycle as last render, or still empty.
    Unchanged,
    /// A new cycle was rendered.
    Rendered,
}

pub struct LiveFactoryMap {
    width: f64,
    height: f64,
    padding: f64,
    last_cycle_id: Option<u64>,
    scene: MapScene,
    descriptions: Vec<String>,
}

impl LiveFactoryMap {
    pub fn new(cfg: &Config) -> Self {
        Self {
            width: cfg.map_width,
            height: cfg.map_height,
            padding: cfg.map_padding,
            last_cycle_id: None,
            scene: MapScene::empty(cfg.map_width, cfg.map_height),
            descriptions: Vec::new(),
        }
    }

    /// Apply one poll result. The last record is authoritative; a record
    /// whose id matches the previous render is a no-op so the map does not
    /// flash on redundant polls.
    pub fn apply(&mut self, alerts: &[Alert]) -> MapUpdate {
        let Some(current) = alerts.last() else {
            if self.last_cycle_id.is_none() && self.scene.glyphs.is_empty() {
                return MapUpdate::Unchanged;
            }
            self.clear();
            return MapUpdate::Cleared;
        };

        // Records without an id are never deduped; the analytics feed always
        // carries one, but the gate must not wedge shut if it goes missing.
        if current.cycle_id.is_some() && current.cycle_id == self.last_cycle_id {
            return MapUpdate::Unchanged;
        }

        self.scene = MapScene::from_anomalies(&current.anomalies, self.width, self.height, self.padding);
        self.descriptions = describe_all(&current.anomalies);
        self.last_cycle_id = current.cycle_id;
        MapUpdate::Rendered
    }

    pub fn clear(&mut self) {
        self.last_cycle_id = None;
        self.scene = MapScene::empty(self.width, self.height);
        self.descriptions.clear();
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn last_cycle_id(&self) -> Option<u64> {
        self.last_cycle_id
    }

    pub fn svg(&self) -> String {
        self.scene.to_svg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anomaly, Severity};

    fn test_map() -> LiveFactoryMap {
        let mut cfg = Config::from_env();
        cfg.map_width = 600.0;
        cfg.map_height = 400.0;
        cfg.map_padding = 40.0;
        LiveFactoryMap::new(&cfg)
    }

    fn alert(cycle_id: Option<u64>, anomalies: Vec<Anomaly>) -> Alert {
        Alert {
            alert_type: "MULTIPLE_ANOMALIES".to_string(),
            machine: "CNC_Mill_1".to_string(),
            anomalies,
            cycle_id,
            timestamp: None,
        }
    }

    #[test]
    fn empty_payload_clears_everything() {
        let mut map = test_map();
        map.apply(&[alert(Some(1), vec![Anomaly::new("HIGH_TEMP", Severity::Critical)])]);
        assert_eq!(map.descriptions().len(), 1);

        assert_eq!(map.apply(&[]), MapUpdate::Cleared);
        assert!(map.descriptions().is_empty());
        assert!(map.scene().glyphs.is_empty());
        assert_eq!(map.last_cycle_id(), None);

        // A second empty poll has nothing left to drop.
        assert_eq!(map.apply(&[]), MapUpdate::Unchanged);
    }

    #[test]
    fn repeated_cycle_id_is_idempotent() {
        let mut map = test_map();
        let payload = vec![alert(Some(4), vec![Anomaly::new("HIGH_TEMP", Severity::Critical)])];
        assert_eq!(map.apply(&payload), MapUpdate::Rendered);
        let svg_before = map.svg();
        let descriptions_before = map.descriptions().to_vec();

        assert_eq!(map.apply(&payload), MapUpdate::Unchanged);
        assert_eq!(map.svg(), svg_before);
        assert_eq!(map.descriptions(), descriptions_before.as_slice());
    }

    #[test]
    fn new_cycle_id_rerenders() {
        let mut map = test_map();
        map.apply(&[alert(Some(4), vec![Anomaly::new("HIGH_TEMP", Severity::Critical)])]);
        let update = map.apply(&[alert(Some(5), vec![Anomaly::new("HIGH_VIBRATION", Severity::Warning)])]);
        assert_eq!(update, MapUpdate::Rendered);
        assert_eq!(map.last_cycle_id(), Some(5));
        assert_eq!(map.descriptions().len(), 1);
        assert!(map.svg().contains("#f59f00"));
    }

    #[test]
    fn last_record_is_authoritative() {
        let mut map = test_map();
        let payload = vec![
            alert(Some(1), vec![Anomaly::new("HIGH_TEMP", Severity::Critical)]),
            alert(Some(2), vec![]),
        ];
        assert_eq!(map.apply(&payload), MapUpdate::Rendered);
        assert_eq!(map.last_cycle_id(), Some(2));
        // The newest record had no anomalies, so nothing is drawn.
        assert!(map.scene().glyphs.is_empty());
        assert!(map.descriptions().is_empty());
    }

    #[test]
    fn missing_cycle_id_always_rerenders() {
        let mut map = test_map();
        let payload = vec![alert(None, vec![Anomaly::new("HIGH_TEMP", Severity::Warning)])];
        assert_eq!(map.apply(&payload), MapUpdate::Rendered);
        assert_eq!(map.apply(&payload), MapUpdate::Rendered);
    }
}
