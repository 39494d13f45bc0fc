/*!
 * Structured Tracing
 * Subscriber installation for drive operation traces
 *
 * Environment variables:
 * - RUST_LOG: log filter (default: info)
 * - DRIVE_TRACE_JSON: JSON output when `1` or `true` (default: compact text)
 *
 * The library only emits events. Without a subscriber they are dropped and
 * drive behaviour is unchanged.
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

/// Environment variable switching the subscriber to JSON output
pub const ENV_TRACE_JSON: &str = "DRIVE_TRACE_JSON";

/// Whether `DRIVE_TRACE_JSON` asks for JSON output
pub fn json_output_requested() -> bool {
    std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Install the global subscriber, failing if one is already set
pub fn try_init_tracing() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_output_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?;
        info!("Tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()?;
        info!("Tracing initialized");
    }
    Ok(())
}

/// Install the global subscriber; a second call is a no-op
pub fn init_tracing() {
    let _ = try_init_tracing();
}
