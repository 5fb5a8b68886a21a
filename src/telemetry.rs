use anyhow::{Context, Result};
use std::time::Duration;

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{MetricExporter, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    resource::Resource,
    trace::SdkTracerProvider,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const DEFAULT_ENDPOINT: &str = "http://localhost:4318";
const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Configuração de exportação lida do ambiente.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub traces_endpoint: String,
    pub metrics_endpoint: String,
    pub commit_sha: String,
    pub metrics_interval: Duration,
}

impl TelemetryConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual a [`Self::from_env`], mas com uma fonte de variáveis arbitrária.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let base = base.trim_end_matches('/');
        let traces_endpoint = lookup("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT")
            .unwrap_or_else(|| format!("{}/v1/traces", base));
        let metrics_endpoint = lookup("OTEL_EXPORTER_OTLP_METRICS_ENDPOINT")
            .unwrap_or_else(|| format!("{}/v1/metrics", base));
        let commit_sha = lookup("POOL_COMMIT_SHA").unwrap_or_else(|| "unknown".into());
        let secs = match lookup("POOL_METRICS_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("POOL_METRICS_INTERVAL_SECS inválido: {raw:?}"))?,
            None => DEFAULT_INTERVAL_SECS,
        };
        Ok(Self {
            traces_endpoint,
            metrics_endpoint,
            commit_sha,
            metrics_interval: Duration::from_secs(secs.max(1)),
        })
    }
}

pub struct Telemetry {
    pub tracer_provider: SdkTracerProvider,
    pub meter_provider: SdkMeterProvider,
}

impl Telemetry {
    pub fn shutdown(&self) {
        let _ = self.meter_provider.force_flush();
        let _ = self.tracer_provider.shutdown();
        let _ = self.meter_provider.shutdown();
    }
}

/// Instala subscriber `tracing` (EnvFilter + fmt + OTel) e os providers OTLP/HTTP.
pub fn init(service_name: &str, cfg: &TelemetryConfig) -> Result<Telemetry> {
    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", service_name.to_string()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", cfg.commit_sha.clone()),
        ])
        .build();

    // ---- Traces (OTLP/HTTP) ----
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(cfg.traces_endpoint.clone())
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let tracer = tracer_provider.tracer(service_name.to_string());

    // ---- Métricas (OTLP/HTTP) ----
    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(cfg.metrics_endpoint.clone())
        .build()?;

    let reader = PeriodicReader::builder(metric_exporter)
        .with_interval(cfg.metrics_interval)
        .build();

    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build();

    // Globais: os histogramas de `obs::wrap` passam a exportar daqui em diante
    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt_layer)
        .with(otel_layer);
    tracing::subscriber::set_global_default(subscriber).context("subscriber global já instalado")?;

    Ok(Telemetry { tracer_provider, meter_provider })
}

/// Span INFO com nome estático; o nome dinâmico vai em `span_name`.
pub fn make_info_span(name: &str, op_id: u32, commit_sha: &str) -> tracing::Span {
    tracing::span!(
        target: "swap_pool_core",
        Level::INFO,
        "op",
        git_commit_sha = %commit_sha,
        span_name = %name,
        op_id = op_id,
    )
}
