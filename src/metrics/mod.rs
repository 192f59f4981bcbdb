use std::sync::{Arc, OnceLock};

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

// The recorder is process-global and can only be installed once.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Prometheus recorder handle shared across workers.
#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Arc<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install Prometheus recorder");

            Self::describe_metrics();

            handle
        });

        Self {
            prometheus_handle: Arc::new(handle.clone()),
        }
    }

    fn describe_metrics() {
        describe_counter!("account_registrations_total", "Accounts created");
        describe_counter!("auth_tokens_issued_total", "Bearer tokens issued");
        describe_counter!("auth_failures_total", "Failed credential checks");
        describe_counter!("account_profile_updates_total", "Profile updates applied");
    }

    /// Render the current metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
