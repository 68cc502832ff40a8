use scout_core::{LogFormat, OtelConfig, ServiceConfig};
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str =
    "media_scout=info,scout_api=info,scout_services=info,scout_db=info,tower_http=info";

/// Initialize tracing: console output in the configured format plus, when enabled
/// and compiled in, an OTLP span exporter. A no-op when both are off.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(
    service: &ServiceConfig,
    otel: &OtelConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if !service.logging_enabled && !otel.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    #[cfg(feature = "observability-opentelemetry")]
    let otel_layer = super::init_opentelemetry::otel_layer(otel, &service.environment)?;
    #[cfg(not(feature = "observability-opentelemetry"))]
    let otel_layer: Option<tracing_subscriber::layer::Identity> = None;

    let console = service.logging_enabled;
    let compact_fmt = (console && service.log_format == LogFormat::Compact).then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(Format::default().compact().with_target(false))
    });
    let json_fmt = (console && service.log_format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(compact_fmt)
        .with(json_fmt)
        .try_init()?;

    tracing::info!(format = ?service.log_format, otel = otel.enabled, "Tracing initialized");

    if otel.enabled && cfg!(not(feature = "observability-opentelemetry")) {
        tracing::warn!(
            "OTEL_ENABLED is set but this build lacks the observability-opentelemetry feature; spans are not exported"
        );
    }

    Ok(())
}

/// Flush and stop span export. A no-op without the `observability-opentelemetry` feature.
pub fn shutdown_telemetry() {
    #[cfg(feature = "observability-opentelemetry")]
    super::init_opentelemetry::shutdown();
}
