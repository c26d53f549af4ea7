//! One check run: fetch snapshots from a source and evaluate them.

use tracing::{debug, info, warn};

use crate::report::HealthReport;
use crate::source::ClusterSource;

/// Run a full check against `source`.
///
/// Nodes are listed cluster-wide and pods in `namespace`. A failed listing
/// is logged and recorded on the report (`node_fetch_error` /
/// `pod_fetch_error`); the other section is still evaluated.
pub async fn run_check(source: &dyn ClusterSource, namespace: &str) -> HealthReport {
    let (nodes, node_fetch_error) = match source.list_nodes().await {
        Ok(nodes) => (nodes, None),
        Err(e) => {
            warn!(error = %e, "Failed to list nodes");
            (Vec::new(), Some(format!("Failed to list nodes: {e}")))
        }
    };

    let (pods, pod_fetch_error) = match source.list_pods(namespace).await {
        Ok(pods) => (pods, None),
        Err(e) => {
            warn!(namespace = %namespace, error = %e, "Failed to list pods");
            (Vec::new(), Some(format!("Failed to list pods: {e}")))
        }
    };

    let mut report = HealthReport::evaluate(namespace, &nodes, &pods);
    report.node_fetch_error = node_fetch_error;
    report.pod_fetch_error = pod_fetch_error;

    for node in &report.nodes {
        if !node.ready {
            debug!(node = %node.name, "Node is not ready");
        }
        for pressure in &node.pressure_warnings {
            debug!(node = %node.name, pressure = %pressure, "Node reports pressure");
        }
    }

    let summary = report.summary();
    info!(
        namespace = %namespace,
        nodes_ready = summary.nodes_ready,
        nodes_not_ready = summary.nodes_not_ready,
        nodes_under_pressure = summary.nodes_under_pressure,
        pods_healthy = summary.pods_healthy,
        pods_pending = summary.pods_pending,
        pods_unhealthy = summary.pods_unhealthy,
        "Cluster check complete"
    );

    report
}
