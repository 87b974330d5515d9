//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every span.
const SERVICE_NAME: &str = "popcorn";

/// File the spans are written to, inside the data directory.
pub const TRACE_FILE_NAME: &str = "popcorn-traces.jsonl";

/// Installs the global subscriber exporting spans to the data directory.
///
/// The level comes from `trace_level` in the plugin configuration and
/// defaults to `"info"`. Does nothing if the data directory cannot be
/// created. Only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
