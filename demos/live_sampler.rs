//! Samples the host for a short while, then replays what was recorded.
//!
//! ```text
//! RUST_LOG=usage_sampler=debug cargo run --example live_sampler
//! ```

use std::path::PathBuf;
use std::time::Duration;

use futures::StreamExt;
use tracing_subscriber::EnvFilter;
use usage_sampler::prelude::*;

const SAMPLES: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let dir = std::env::temp_dir().join("usage-sampler-demo");
    std::fs::create_dir_all(&dir)?;
    let store = SqliteStore::open(dir.join("system_data.db"))?;

    let config = SamplerConfig::from_settings(&store.fetch_settings()?);
    config.validate()?;
    for setting in config.to_settings() {
        store.upsert_setting(&setting)?;
    }

    let scheduler = SampleScheduler::new(config)?;
    let profile = scheduler.record_hardware_profile(&store).await?;
    println!("Host: {} / {} / {:.2} GB / {}", profile.cpu_name, profile.gpu_name, profile.ram_size_gb, profile.os_name);

    let mut handle = scheduler.spawn();
    let control = handle.control();

    let mut samples = Box::pin(handle.samples().take(SAMPLES));
    while let Some(sample) = samples.next().await {
        println!(
            "{}  cpu {:5.1}%  mem {:5.1}%  gpu {:5.1}%  net {:8.2} KB/s",
            sample.time_string(),
            sample.cpu_percent(),
            sample.memory_percent(),
            sample.gpu_percent(),
            sample.network_rate_kb_per_s()
        );
    }

    let persisted = control.persist_log(&store)?;
    let csv_path: PathBuf = dir.join("usage.csv");
    CsvCodec::new().export_file(&csv_path, &control.log_snapshot())?;
    println!("Saved {persisted} samples to the store and {}", csv_path.display());

    let replayed = control.import_replay(&CsvCodec::new(), &std::fs::read(&csv_path)?)?;
    println!("Replaying {replayed} samples; CPU window: {:?}", control.window(MetricKind::Cpu));
    tokio::time::sleep(Duration::from_secs(2)).await;

    control.resume_live();
    handle.stop().await
}
