use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Load,
    Save,
    LoadPref,
    SavePref,
}

impl StoreOp {
    fn as_str(self) -> &'static str {
        match self {
            StoreOp::Load => "load",
            StoreOp::Save => "save",
            StoreOp::LoadPref => "load_pref",
            StoreOp::SavePref => "save_pref",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Missing,
    Failed,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Missing => "missing",
            Outcome::Failed => "failed",
        }
    }
}

pub struct StoreMetrics {
    registry: Registry,
    ops: IntCounterVec,
}

impl StoreMetrics {
    fn new() -> Self {
        let registry = Registry::new();
        let ops = IntCounterVec::new(
            Opts::new("neonweight_store_ops_total", "Snapshot store operations by outcome"),
            &["op", "outcome"],
        )
        .expect("static metric opts are valid");
        registry
            .register(Box::new(ops.clone()))
            .expect("metric registered once");
        Self { registry, ops }
    }

    pub fn record(&self, op: StoreOp, outcome: Outcome) {
        self.ops.with_label_values(&[op.as_str(), outcome.as_str()]).inc();
    }

    pub fn count(&self, op: StoreOp, outcome: Outcome) -> u64 {
        self.ops.with_label_values(&[op.as_str(), outcome.as_str()]).get()
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        if TextEncoder::new().encode(&self.registry.gather(), &mut buf).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

pub static STORE_METRICS: Lazy<StoreMetrics> = Lazy::new(StoreMetrics::new);

pub fn store_metrics() -> &'static StoreMetrics {
    &STORE_METRICS
}
