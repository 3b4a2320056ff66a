//! Boot — logging init, config load, session creation.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::FishlogConfig;
use crate::state::Session;
use super::cli::Cli;
use super::error::RunError;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout stays clean for reports.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fishlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config, apply CLI overrides and build the session.
pub fn boot(cli: &Cli) -> Result<Session, RunError> {
    info!("Starting fishlog v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file or env), then flags on top
    let mut config = FishlogConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(
        "Loaded configuration: cache_capacity={}, yield_interval={}, view={:?}, output={:?}",
        config.cache_capacity, config.yield_interval, config.report.view, config.output
    );

    let session = Session::new(config);
    info!("Initialized session state");

    Ok(session)
}
