//! One-shot diagnostic: poll the alerts endpoint once, render the scene,
//! print a summary. Pass a path to also dump the SVG.
//! Run with: cargo run --bin snapshot [out.svg]

use anyhow::Result;

use factorydash::backend::{Backend, BackendKind};
use factorydash::map::LiveFactoryMap;
use factorydash::state::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let svg_out = std::env::args().nth(1);

    let cfg = Config::from_env();
    let backend = BackendKind::from_env().build(&cfg)?;
    let mut view = LiveFactoryMap::new(&cfg);

    let alerts = backend.fetch_alerts().await?;
    println!("Fetched {} alert(s) from {}", alerts.len(), cfg.alerts_base);

    let update = view.apply(&alerts);
    println!("Map update: {:?}", update);
    println!("Current cycle: {:?}", view.last_cycle_id());
    println!();

    if view.descriptions().is_empty() {
        println!("No active anomalies.");
    } else {
        println!("Active anomalies:");
        for desc in view.descriptions() {
            println!("  - {}", desc);
        }
    }

    if let Some(path) = svg_out {
        std::fs::write(&path, view.svg())?;
        println!();
        println!("Wrote scene to {}", path);
    }
    Ok(())
}
