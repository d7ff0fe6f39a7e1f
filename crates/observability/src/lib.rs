use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Where a resolver's answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
    Missing,
}

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    llm_classifications_total: AtomicU64,
    rule_classifications_total: AtomicU64,
    rejected_total: AtomicU64,
    live_hits_total: AtomicU64,
    fallback_hits_total: AtomicU64,
    misses_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub llm_classifications_total: u64,
    pub rule_classifications_total: u64,
    pub rejected_total: u64,
    pub live_hits_total: u64,
    pub fallback_hits_total: u64,
    pub misses_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// `model` is the classifier path that produced the intent.
    pub fn inc_classification(&self, model: &str) {
        let counter = if model == "llm" {
            &self.llm_classifications_total
        } else {
            &self.rule_classifications_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source(&self, source: DataSource) {
        let counter = match source {
            DataSource::Live => &self.live_hits_total,
            DataSource::Fallback => &self.fallback_hits_total,
            DataSource::Missing => &self.misses_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            llm_classifications_total: self.llm_classifications_total.load(Ordering::Relaxed),
            rule_classifications_total: self.rule_classifications_total.load(Ordering::Relaxed),
            rejected_total: self.rejected_total.load(Ordering::Relaxed),
            live_hits_total: self.live_hits_total.load(Ordering::Relaxed),
            fallback_hits_total: self.fallback_hits_total.load(Ordering::Relaxed),
            misses_total: self.misses_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,yatra_agents=info,yatra_llm=info,yatra_fallback=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
