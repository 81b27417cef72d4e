use std::sync::{Arc, Mutex};

use anyhow::Result;

use factorydash::backend::BackendKind;
use factorydash::map::LiveFactoryMap;
use factorydash::poller::PollScheduler;
use factorydash::server::{self, Dashboard};
use factorydash::state::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let backend = BackendKind::from_env().build(&cfg)?;
    let map = Arc::new(Mutex::new(LiveFactoryMap::new(&cfg)));

    let mut poller = PollScheduler::start(backend.clone(), map.clone(), cfg.poll_interval_ms);

    eprintln!("[factorydash] serving at http://{}", cfg.listen_addr);
    eprintln!(
        "[factorydash] polling {}/api/alerts every {}ms",
        cfg.alerts_base, cfg.poll_interval_ms
    );

    let result = server::serve(Dashboard { cfg, backend, map }).await;
    poller.stop();
    result
}
