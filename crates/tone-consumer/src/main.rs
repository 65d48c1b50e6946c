mod config;
mod kafka;
mod signal;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::kafka::KafkaSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tone_consumer=info,tone_pipeline=info,tone_db=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Setup failures are fatal
    let db = tone_db::Database::open(&config.db_path)?;
    let mut source = KafkaSource::subscribe(&config)?;

    info!(
        "consumer ready | topic={} group={} db={}",
        config.topic,
        config.group_id,
        config.db_path.display()
    );

    let shutdown = CancellationToken::new();
    tokio::spawn(signal::cancel_on_signal(shutdown.clone()));

    let summary = tone_pipeline::run(&mut source, &db, &shutdown).await;
    debug!("Stored {} records, skipped {}", summary.stored, summary.skipped);

    tone_pipeline::release(source, db);
    Ok(())
}
