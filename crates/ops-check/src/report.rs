//! Cluster-wide report built from per-object verdicts.

use serde::Serialize;

use crate::node::{evaluate_node, NodeVerdict};
use crate::pod::{evaluate_pod, PodStatus, PodVerdict};
use crate::snapshot::{NodeSnapshot, PodSnapshot};

/// Verdicts for one check run, in the order the objects were supplied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthReport {
    /// Namespace the pods were listed from.
    pub namespace: String,
    pub nodes: Vec<NodeVerdict>,
    pub pods: Vec<PodVerdict>,
    /// Set when listing nodes failed; `nodes` is empty in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_fetch_error: Option<String>,
    /// Set when listing pods failed; `pods` is empty in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_fetch_error: Option<String>,
}

/// Counts derived from a [`HealthReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub nodes_ready: usize,
    pub nodes_not_ready: usize,
    pub nodes_under_pressure: usize,
    pub pods_healthy: usize,
    pub pods_pending: usize,
    pub pods_unhealthy: usize,
}

impl HealthReport {
    /// Evaluate every snapshot independently, preserving input order.
    #[must_use]
    pub fn evaluate(
        namespace: impl Into<String>,
        nodes: &[NodeSnapshot],
        pods: &[PodSnapshot],
    ) -> Self {
        Self {
            namespace: namespace.into(),
            nodes: nodes.iter().map(evaluate_node).collect(),
            pods: pods.iter().map(evaluate_pod).collect(),
            node_fetch_error: None,
            pod_fetch_error: None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();

        for node in &self.nodes {
            if node.ready {
                summary.nodes_ready += 1;
            } else {
                summary.nodes_not_ready += 1;
            }
            if node.under_pressure() {
                summary.nodes_under_pressure += 1;
            }
        }

        for pod in &self.pods {
            match pod.status {
                PodStatus::Healthy => summary.pods_healthy += 1,
                PodStatus::NeedsAttention => summary.pods_pending += 1,
                PodStatus::Unhealthy { .. } => summary.pods_unhealthy += 1,
            }
        }

        summary
    }

    /// True when every node is ready without pressure, every pod is
    /// running, and both listings succeeded.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        let summary = self.summary();
        self.node_fetch_error.is_none()
            && self.pod_fetch_error.is_none()
            && summary.nodes_not_ready == 0
            && summary.nodes_under_pressure == 0
            && summary.pods_pending == 0
            && summary.pods_unhealthy == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ConditionStatus::{False, True};

    #[test]
    fn test_order_is_preserved() {
        let nodes = vec![
            NodeSnapshot::new("c").with_condition("Ready", True),
            NodeSnapshot::new("a").with_condition("Ready", False),
            NodeSnapshot::new("b"),
        ];
        let pods = vec![
            PodSnapshot::new("z", "default", "Running"),
            PodSnapshot::new("y", "default", "Failed"),
        ];

        let report = HealthReport::evaluate("default", &nodes, &pods);
        let node_names: Vec<_> = report.nodes.iter().map(|n| n.name.as_str()).collect();
        let pod_names: Vec<_> = report.pods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(node_names, ["c", "a", "b"]);
        assert_eq!(pod_names, ["z", "y"]);
    }

    #[test]
    fn test_summary_counts() {
        let nodes = vec![
            NodeSnapshot::new("n1")
                .with_condition("Ready", True)
                .with_condition("MemoryPressure", True),
            NodeSnapshot::new("n2").with_condition("Ready", False),
            NodeSnapshot::new("n3").with_condition("Ready", True),
        ];
        let pods = vec![
            PodSnapshot::new("p1", "default", "Running"),
            PodSnapshot::new("p2", "default", "Pending"),
            PodSnapshot::new("p3", "default", "Succeeded"),
            PodSnapshot::new("p4", "default", "Failed"),
        ];

        let summary = HealthReport::evaluate("default", &nodes, &pods).summary();
        assert_eq!(
            summary,
            ReportSummary {
                nodes_ready: 2,
                nodes_not_ready: 1,
                nodes_under_pressure: 1,
                pods_healthy: 1,
                pods_pending: 1,
                pods_unhealthy: 2,
            }
        );
    }

    #[test]
    fn test_is_healthy() {
        let nodes = vec![NodeSnapshot::new("n1").with_condition("Ready", True)];
        let pods = vec![PodSnapshot::new("p1", "default", "Running")];
        let mut report = HealthReport::evaluate("default", &nodes, &pods);
        assert!(report.is_healthy());

        report.pod_fetch_error = Some("connection refused".to_string());
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_pressure_makes_report_unhealthy() {
        let nodes = vec![NodeSnapshot::new("n1")
            .with_condition("Ready", True)
            .with_condition("PIDPressure", True)];
        let report = HealthReport::evaluate("default", &nodes, &[]);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_empty_report_is_healthy() {
        assert!(HealthReport::evaluate("default", &[], &[]).is_healthy());
    }
}
