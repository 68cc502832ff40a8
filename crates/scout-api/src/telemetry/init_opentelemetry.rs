//! OTLP span export for the `observability-opentelemetry` feature.

use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    runtime,
    trace::{Sampler, Tracer, TracerProvider},
    Resource,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use scout_core::{OtelConfig, OtelSampler, OtlpProtocol};
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Build the tracing layer that exports spans to `config.endpoint`, and install its
/// provider globally. `None` when export is disabled.
pub(super) fn otel_layer<S>(
    config: &OtelConfig,
    environment: &str,
) -> Result<Option<OpenTelemetryLayer<S, Tracer>>, BoxError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    if !config.enabled {
        return Ok(None);
    }

    let exporter = match config.protocol {
        OtlpProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.clone())
            .build(),
        OtlpProtocol::Http => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.clone())
            .build(),
    }
    .map_err(|e| format!("Failed to build OTLP span exporter: {}", e))?;

    let sampler = match config.sampler {
        OtelSampler::AlwaysOn => Sampler::AlwaysOn,
        OtelSampler::AlwaysOff => Sampler::AlwaysOff,
        OtelSampler::TraceIdRatio(ratio) => Sampler::TraceIdRatioBased(ratio),
    };

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, config.service_name.clone()),
        KeyValue::new("service.namespace", config.service_name.clone()),
        KeyValue::new(SERVICE_VERSION, config.service_version.clone()),
        KeyValue::new("deployment.environment", environment.to_string()),
    ]);

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_sampler(sampler)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(config.service_name.clone());
    opentelemetry::global::set_tracer_provider(provider);

    Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer)))
}

pub(super) fn shutdown() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::Registry;

    fn otel_config(enabled: bool) -> OtelConfig {
        OtelConfig {
            enabled,
            endpoint: "http://127.0.0.1:4317".to_string(),
            service_name: "media-scout".to_string(),
            service_version: "0.1.0".to_string(),
            protocol: OtlpProtocol::Grpc,
            sampler: OtelSampler::TraceIdRatio(0.5),
        }
    }

    #[tokio::test]
    async fn disabled_export_builds_no_layer() {
        let layer = otel_layer::<Registry>(&otel_config(false), "test").expect("layer");
        assert!(layer.is_none());
    }

    // The batch processor needs a runtime worker to run on.
    #[tokio::test(flavor = "multi_thread")]
    async fn enabled_export_builds_layer_without_collector() {
        let layer = otel_layer::<Registry>(&otel_config(true), "test").expect("layer");
        assert!(layer.is_some());
    }
}
