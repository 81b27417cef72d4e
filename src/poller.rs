//! Poll scheduler for the live factory map.
//!
//! One task, one interval: tick, fetch, apply, repeat. Fetch and decode
//! failures are logged and the tick ends; the next tick simply tries again.
//! `stop` aborts the task, which is the only teardown the view needs since
//! no response can be observed after the task is gone.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::backend::Backend;
use crate::logging::{json_log, log, obj, v_num, v_str, Domain, Level};
use crate::map::{LiveFactoryMap, MapUpdate};

pub struct PollScheduler {
    handle: Option<JoinHandle<()>>,
}

impl PollScheduler {
    pub fn start(
        backend: Arc<dyn Backend>,
        map: Arc<Mutex<LiveFactoryMap>>,
        interval_ms: u64,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(interval_ms));
            // A slow fetch delays the next poll instead of bursting.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match backend.fetch_alerts().await {
                    Ok(alerts) => {
                        let update = {
                            let mut map = map.lock().expect("map lock poisoned");
                            map.apply(&alerts)
                        };
                        match update {
                            MapUpdate::Rendered => json_log(
                                Domain::Feed,
                                "cycle_rendered",
                                obj(&[("alerts", v_num(alerts.len() as f64))]),
                            ),
                            MapUpdate::Cleared => {
                                json_log(Domain::Feed, "map_cleared", obj(&[]))
                            }
                            MapUpdate::Unchanged => {}
                        }
                    }
                    Err(err) => log(
                        Level::Warn,
                        Domain::Feed,
                        "alerts_poll_failed",
                        obj(&[("error", v_str(&err.to_string()))]),
                    ),
                }
            }
        });
        Self { handle: Some(handle) }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
