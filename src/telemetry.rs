//! Tracing setup helpers for hosts embedding `timeslot-rs`.
//!
//! Nothing here runs implicitly: the engine only emits `tracing` events, and
//! a host either installs its own subscriber or opts into this default one
//! through the `telemetry` feature.

/// Installs a compact `tracing` subscriber honoring `RUST_LOG`.
///
/// Returns `true` on success and `false` when the feature is disabled or a
/// global subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
