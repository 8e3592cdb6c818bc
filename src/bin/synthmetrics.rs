//! synthmetrics server binary
//!
//! Builds (or reloads) the synthetic data set and serves it on `/metrics`.

use synthmetrics::api::{self, ApiServerConfig};
use synthmetrics::exposition::Exposition;
use synthmetrics::rotation::{RotatedOverlay, RotationScheduler, RotationTarget};
use synthmetrics::telemetry::{self, LogFormat};
use synthmetrics::{Dataset, Error, GeneratorConfig, SnapshotStore};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Synthetic Prometheus metrics generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generator configuration file
    #[arg(long, env = "SYNTHMETRICS_CONFIG", default_value = "config/config.json")]
    config: PathBuf,

    /// Snapshot file used when persistBetweenRuns is enabled
    #[arg(long, env = "SYNTHMETRICS_DATA_FILE", default_value = "config/data.json")]
    data_file: PathBuf,

    /// HTTP port
    #[arg(long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Also refresh gauge values in the background (e.g. "15s")
    #[arg(long, value_parser = humantime::parse_duration)]
    refresh_interval: Option<Duration>,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    telemetry::init_tracing(&args.log_level, args.log_format)?;

    info!("Starting synthmetrics");

    let config = GeneratorConfig::load(&args.config)?;
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => {
            info!(seed, "Using fixed generation seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let store = SnapshotStore::new(&args.data_file);
    let (dataset, origin) = match Dataset::initialize(&config, &store, &mut rng) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Failed to build the synthetic data set");
            return Err(e.into());
        }
    };
    let dataset = Arc::new(dataset);

    info!(
        origin = origin.as_str(),
        metrics = dataset.metrics().len(),
        series = dataset.series_count(),
        labels = dataset.labels().len(),
        rotation_labels = dataset.rotation().len(),
        "Data set ready"
    );

    let overlay = RotatedOverlay::draw(dataset.rotation(), &mut rng);
    let exposition = Arc::new(Exposition::new(
        dataset.clone(),
        overlay,
        config.collect_default_metrics,
        StdRng::seed_from_u64(rng.gen()),
    )?);

    let cancel = CancellationToken::new();

    let target: Arc<dyn RotationTarget> = exposition.clone();
    if let Some(scheduler) = RotationScheduler::arm(
        &config.labels.rotation_cron_schedule,
        dataset.clone(),
        target,
        StdRng::seed_from_u64(rng.gen()),
    )? {
        tokio::spawn(scheduler.run(cancel.clone()));
    }

    if let Some(period) = args.refresh_interval {
        let exposition = exposition.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            run_refresh_timer(exposition, period, cancel).await;
        });
    }

    let api_config = ApiServerConfig {
        http_port: args.port,
        enable_cors: !args.no_cors,
    };
    let router = api::build_http_router(exposition, &api_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], api_config.http_port));
    let listener = TcpListener::bind(addr).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    info!(http_port = api_config.http_port, "synthmetrics ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await
        .map_err(|e| Error::Internal(format!("HTTP server error: {e}")))?;

    cancel.cancel();
    info!("synthmetrics shutting down");

    Ok(())
}

async fn run_refresh_timer(exposition: Arc<Exposition>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    info!(period = %humantime::format_duration(period), "Background value refresh enabled");

    loop {
        tokio::select! {
            _ = ticker.tick() => exposition.refresh(),
            _ = cancel.cancelled() => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    if *shutdown.borrow() {
        return;
    }
    let _ = shutdown.changed().await;
}
