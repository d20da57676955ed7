//! FLARE LSMA - Main Entry Point

use clap::Parser;
use flare_lsma::{FlareRelay, RelayConfig, RelayError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "flare-lsma", version, about = "Alert-driven mitigation relay for SDN controllers")]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "FLARE_CONFIG", default_value = "/etc/flare/lsma.toml")]
    config: String,

    /// Listen address for the alert API
    #[arg(long, env = "FLARE_LISTEN")]
    listen: Option<String>,

    /// Static flow pusher URL
    #[arg(long, env = "FLARE_CONTROLLER_URL")]
    controller_url: Option<String>,

    /// Confidence above which alerts are mitigated
    #[arg(long, env = "FLARE_CONFIDENCE_THRESHOLD")]
    confidence_threshold: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "flare_lsma=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("FLARE LSMA v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match RelayConfig::load(&args.config) {
        Ok(config) => config,
        Err(RelayError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %args.config, "Config not found, using defaults");
            RelayConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(url) = args.controller_url {
        config.controller.url = url;
    }
    if let Some(threshold) = args.confidence_threshold {
        config.confidence_threshold = threshold;
    }

    let relay = FlareRelay::new(config)?;
    relay.run(shutdown_signal()).await?;

    tracing::info!("FLARE LSMA stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
