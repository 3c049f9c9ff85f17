//! Realm server entry point.
mod config;
mod content;

use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::ServerConfig;
use realm_runtime::Realm;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::load()?;
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let realm = Realm::builder()
        .config(config.runtime_config())
        .catalog(content::skill_catalog())
        .build()
        .await?;
    content::populate(&realm)?;

    let mut animations = realm.subscribe(content::LORENCIA);
    let observer = tokio::spawn(async move {
        while let Ok(animation) = animations.recv().await {
            info!(
                target: "realm::server",
                actor = %animation.actor,
                skill = %animation.skill,
                origin = %animation.origin,
                "skill animation"
            );
        }
    });

    info!(target: "realm::server", "realm running, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    let metrics = realm.metrics().snapshot();
    let acceptance_rate = realm.metrics().acceptance_rate();
    info!(target: "realm::server", ?metrics, acceptance_rate, "shutting down");
    realm.shutdown().await?;
    observer.abort();

    Ok(())
}

/// Logs to stderr, and to daily rolling files when `log_dir` is set.
///
/// The returned guard must stay alive for buffered file output to be flushed.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "realm.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        info!(target: "realm::server", log_dir = %dir.display(), "file logging enabled");
    }
    Ok(guard)
}
