//! Seam to the external factory services.
//!
//! The analytics service owns anomaly detection and the simulator owns
//! telemetry; this crate only consumes their JSON. Everything behind the
//! trait so tests and offline demos can swap in a stub.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Alert, TelemetryRecord};
use crate::state::Config;

mod http;
mod replay;

pub use http::HttpBackend;
pub use replay::ReplayBackend;

#[async_trait]
pub trait Backend: Send + Sync {
    /// GET /api/alerts, ordered oldest to newest.
    async fn fetch_alerts(&self) -> Result<Vec<Alert>>;

    /// GET /api/run-cycle, one telemetry record per machine.
    async fn run_cycle(&self) -> Result<Vec<TelemetryRecord>>;
}

#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Http,
    Replay,
}

impl BackendKind {
    pub fn from_env() -> Self {
        match std::env::var("BACKEND").unwrap_or_else(|_| "http".to_string()).as_str() {
            "replay" => BackendKind::Replay,
            _ => BackendKind::Http,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Arc<dyn Backend>> {
        match self {
            BackendKind::Http => Ok(Arc::new(HttpBackend::new(cfg)?)),
            BackendKind::Replay => Ok(Arc::new(ReplayBackend::new())),
        }
    }
}
