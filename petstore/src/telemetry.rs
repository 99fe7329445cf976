//! Telemetry initialization (tracing with an fmt subscriber).
//!
//! Sets up tracing-subscriber with console output and an `RUST_LOG`-style
//! environment filter. Every request is traced by the HTTP layer's
//! `TraceLayer`, and repository/service methods carry their own
//! `#[instrument]` spans.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing for the process.
///
/// The filter comes from `RUST_LOG` when set, defaulting to `info`.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
