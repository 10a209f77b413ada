//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by `OperatorClient` when observability
//! is enabled through `ClientBuilder::with_observability()`. Without an
//! installed meter provider the instruments are no-ops.
//!
//! # Metrics Collected
//!
//! - **requests_total**: RPC calls dispatched, by method and status (counter)
//! - **request_duration**: Round-trip latency in seconds (histogram)
//! - **errors_total**: Failed calls, by error kind (counter)
//! - **validation_failures**: Calls rejected before dispatch, by method and field (counter)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of RPC calls dispatched
    pub requests_total: Counter<u64>,
    /// RPC round-trip duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of calls rejected by parameter validation
    pub validation_failures: Counter<u64>,
}

impl ClientMetrics {
    /// Create a new ClientMetrics instance on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into())
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    /// Create a new ClientMetrics instance with a custom meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("mascot.client.requests.total")
                .with_description("Total number of RPC calls dispatched")
                .build(),
            request_duration: meter
                .f64_histogram("mascot.client.request.duration")
                .with_description("RPC round-trip duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("mascot.client.errors.total")
                .with_description("Total number of failed RPC calls")
                .build(),
            validation_failures: meter
                .u64_counter("mascot.client.validation.failures")
                .with_description("Total number of calls rejected before dispatch")
                .build(),
        }
    }

    /// Record a dispatched call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    pub fn record_error(&self, error_kind: &str) {
        let attributes = &[KeyValue::new("error_type", error_kind.to_string())];
        self.errors_total.add(1, attributes);
    }

    /// Record a call rejected by validation
    pub fn record_validation_failure(&self, method: &str, field: Option<&str>) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("field", field.unwrap_or("<params>").to_string()),
        ];
        self.validation_failures.add(1, attributes);
    }
}
