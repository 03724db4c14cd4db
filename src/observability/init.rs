//! Tracing subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer::{self, ExportTarget};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Eventboard";
const SCOPE_NAME: &str = "eventboard";
const TRACE_FILE_NAME: &str = "eventboard-otlp.json";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` → OpenTelemetry → trace file.
///
/// The filter comes from `trace_level` (any `EnvFilter` directive, e.g.
/// `"eventboard=debug"`); an unparsable directive falls back to `info`.
/// Traces go to `~/.local/share/zellij/eventboard/eventboard-otlp.json`.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without a subscriber. Calling this twice keeps the first
/// subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let target = ExportTarget {
        file_path: data_dir.join(TRACE_FILE_NAME),
        rotation: RotationPolicy::default(),
        scope_name: SCOPE_NAME.to_string(),
    };
    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(target, resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
