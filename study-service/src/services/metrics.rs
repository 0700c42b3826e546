//! Prometheus metrics for study-service.
//!
//! HTTP request metrics come from the `metrics` facade (see
//! `service_core::middleware::metrics`); provider metrics live in a local
//! `prometheus` registry. Both are rendered together by `/metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static GENERATION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize metrics collection. Safe to call more than once; only the first
/// call installs anything.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_none() {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = METRICS_HANDLE.set(handle);
            }
            Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
        }
    }

    if PROMETHEUS_REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let requests = IntCounterVec::new(
        Opts::new(
            "study_generation_requests_total",
            "Generation requests by feature and outcome",
        ),
        &["feature", "outcome"],
    );
    let latency = HistogramVec::new(
        HistogramOpts::new(
            "study_provider_latency_seconds",
            "Provider call latency in seconds",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
        &["feature", "provider"],
    );
    let tokens = IntCounterVec::new(
        Opts::new("study_provider_tokens_total", "Tokens reported by the provider"),
        &["feature", "type"], // type: input, output
    );

    let (requests, latency, tokens) = match (requests, latency, tokens) {
        (Ok(r), Ok(l), Ok(t)) => (r, l, t),
        _ => {
            tracing::error!("Failed to create study-service metrics");
            return;
        }
    };

    for collector in [
        Box::new(requests.clone()) as Box<dyn prometheus::core::Collector>,
        Box::new(latency.clone()),
        Box::new(tokens.clone()),
    ] {
        if let Err(e) = registry.register(collector) {
            tracing::error!("Failed to register metric collector: {}", e);
            return;
        }
    }

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = GENERATION_REQUESTS_TOTAL.set(requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(latency);
    let _ = PROVIDER_TOKENS_TOTAL.set(tokens);
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&registry.gather(), &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    if output.is_empty() {
        output.push_str("# Metrics recorder not initialized\n");
    }

    output
}

/// Record the outcome of one generation request.
pub fn record_generation(feature: &str, outcome: &str) {
    if let Some(counter) = GENERATION_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[feature, outcome]).inc();
    }
}

/// Record provider latency and token usage.
pub fn record_provider_call(
    feature: &str,
    provider: &str,
    seconds: f64,
    input_tokens: i32,
    output_tokens: i32,
) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[feature, provider]).observe(seconds);
    }
    if let Some(counter) = PROVIDER_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[feature, "input"])
            .inc_by(input_tokens.max(0) as u64);
        counter
            .with_label_values(&[feature, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}
