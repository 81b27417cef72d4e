use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::Backend;
use crate::model::{Alert, TelemetryRecord};
use crate::state::Config;

pub struct HttpBackend {
    client: Client,
    alerts_url: String,
    cycle_url: String,
}

impl HttpBackend {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder().build().context("build http client")?;
        Ok(Self {
            client,
            alerts_url: format!("{}/api/alerts", cfg.alerts_base),
            cycle_url: format!("{}/api/run-cycle", cfg.cycle_base),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        let alerts = self
            .client
            .get(&self.alerts_url)
            .send()
            .await
            .context("alerts request failed")?
            .error_for_status()
            .context("alerts request rejected")?
            .json()
            .await
            .context("alerts payload malformed")?;
        Ok(alerts)
    }

    async fn run_cycle(&self) -> Result<Vec<TelemetryRecord>> {
        let records = self
            .client
            .get(&self.cycle_url)
            .send()
            .await
            .context("run-cycle request failed")?
            .error_for_status()
            .context("run-cycle request rejected")?
            .json()
            .await
            .context("run-cycle payload malformed")?;
        Ok(records)
    }
}
