use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec_with_registry, Encoder, IntCounterVec, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref TOOL_CALLS_TOTAL: IntCounterVec = register_int_counter_vec_with_registry!(
        "configmap_tool_calls_total",
        "Total number of tool invocations by tool and outcome.",
        &["tool", "outcome"],
        REGISTRY
    )
    .unwrap();
}

/// How a tool invocation ended, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The operator reported a domain error.
    Failure,
    /// Rejected before reaching the operator.
    Invalid,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Invalid => "invalid",
        }
    }
}

pub fn record_tool_call(tool: &str, outcome: Outcome) {
    TOOL_CALLS_TOTAL
        .with_label_values(&[tool, outcome.as_str()])
        .inc();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> crate::Result<String> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| crate::Error::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| crate::Error::Internal(format!("Metrics are not valid UTF-8: {}", e)))
}
