use anyhow::Result;
use chrono::Utc;
use std::env;

use wash_synth::{run, LocalObjectStore, RunConfig};

/// Directory the local store maps buckets under
const ENV_STORE_ROOT: &str = "OBJECT_STORE_ROOT";
const DEFAULT_STORE_ROOT: &str = "object-store";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from_env()?;
    let store_root = env::var(ENV_STORE_ROOT).unwrap_or_else(|_| DEFAULT_STORE_ROOT.to_string());
    let store = LocalObjectStore::new(store_root);

    log::info!(
        "wash-synth {}: {} households, bad row rate {}, bucket {} under {}",
        wash_synth::VERSION,
        config.generator.n_households,
        config.generator.bad_row_rate,
        config.bucket,
        store.root().display()
    );

    let summary = run(&config, &store, Utc::now())?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
