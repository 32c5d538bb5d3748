use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_total: IntCounterVec,
    pub enqueue_latency_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_total = IntCounterVec::new(
            Opts::new("orders_total", "Order submissions by intake outcome"),
            &["outcome"],
        )
        .expect("valid orders_total metric");

        let enqueue_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "enqueue_latency_seconds",
                "Time spent waiting on the queue backend in seconds",
            ),
            &["outcome"],
        )
        .expect("valid enqueue_latency_seconds metric");

        registry
            .register(Box::new(orders_total.clone()))
            .expect("register orders_total");
        registry
            .register(Box::new(enqueue_latency_seconds.clone()))
            .expect("register enqueue_latency_seconds");

        Self {
            registry,
            orders_total,
            enqueue_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn encoded_output_lists_observed_series() {
        let metrics = Metrics::new();
        metrics.orders_total.with_label_values(&["created"]).inc();
        metrics
            .enqueue_latency_seconds
            .with_label_values(&["accepted"])
            .observe(0.02);

        let body = metrics.encode().unwrap();
        assert!(body.contains(r#"orders_total{outcome="created"} 1"#));
        assert!(body.contains("enqueue_latency_seconds_bucket"));
    }
}
