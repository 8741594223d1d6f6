//! geography-server: REST + GraphQL over a snapshot written by `geography load`
//!
//!   $ geography-server --config options.json
//!   $ curl localhost:8090/geography/airports/EHAM
//!
//! The bind address comes from `server.bind` in the options file,
//! `GEOGRAPHY_BIND`, or `--bind`, in increasing precedence.

use anyhow::Context;
use clap::{ArgAction, Parser};
use geography_core::{Catalog, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "geography-server", version, about = "Serve geography reference data over HTTP")]
struct ServerArgs {
    /// Options file (default: ./options.json when present)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Snapshot file, overrides the configured database
    #[arg(short = 'd', long = "database")]
    database: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8090
    #[arg(short = 'b', long = "bind")]
    bind: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "geography_server={level},geography_core={level},tower_http={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    setup_logging(args.verbose);

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(db) = args.database {
        settings.database = db;
    }
    if let Some(bind) = args.bind {
        settings.server.bind = bind;
    }

    let catalog = Catalog::load(&settings.database)
        .with_context(|| {
            format!(
                "cannot open snapshot {} (run `geography load` first)",
                settings.database.display()
            )
        })?
        .with_max_results(settings.max_results);
    let stats = catalog.stats();
    info!(
        countries = stats.countries,
        regions = stats.regions,
        airports = stats.airports,
        runways = stats.runways,
        frequencies = stats.frequencies,
        "snapshot loaded"
    );

    let app = geography_server::router(Arc::new(catalog));
    let listener = TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("cannot bind {}", settings.server.bind))?;
    info!(addr = %settings.server.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
