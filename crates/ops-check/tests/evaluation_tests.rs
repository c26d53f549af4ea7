//! Integration tests for node and pod evaluation.
//!
//! These exercise the public API end to end: building snapshots, evaluating
//! them, and running a full check against a snapshot file.

use std::collections::BTreeSet;
use std::io::Write;

use ops_check::node::{DEFAULT_LIFECYCLE, INSTANCE_TYPE_LABEL, LIFECYCLE_LABEL};
use ops_check::{
    evaluate_node, evaluate_pod, run_check, ConditionStatus, HealthReport, NodeSnapshot,
    PodSnapshot, PodStatus, PressureCondition, SnapshotFileSource,
};
use tempfile::NamedTempFile;

use ConditionStatus::{False, True, Unknown};

mod node_tests {
    use super::*;

    #[test]
    fn test_readiness_cases() {
        let test_cases: Vec<(&str, Vec<(&str, ConditionStatus)>, bool)> = vec![
            ("no conditions", vec![], false),
            ("ready", vec![("Ready", True)], true),
            ("not ready", vec![("Ready", False)], false),
            ("unknown", vec![("Ready", Unknown)], false),
            ("only pressure", vec![("MemoryPressure", False)], false),
            ("last wins false", vec![("Ready", True), ("Ready", False)], false),
            ("last wins true", vec![("Ready", False), ("Ready", True)], true),
            (
                "last wins across others",
                vec![
                    ("Ready", Unknown),
                    ("DiskPressure", True),
                    ("Ready", True),
                    ("NetworkUnavailable", False),
                ],
                true,
            ),
        ];

        for (label, conditions, expected) in test_cases {
            let node = conditions
                .into_iter()
                .fold(NodeSnapshot::new("node"), |node, (t, s)| {
                    node.with_condition(t, s)
                });
            assert_eq!(evaluate_node(&node).ready, expected, "Failed for: {label}");
        }
    }

    #[test]
    fn test_pressure_set_matches_true_pressure_conditions() {
        let node = NodeSnapshot::new("node")
            .with_condition("Ready", True)
            .with_condition("MemoryPressure", True)
            .with_condition("DiskPressure", False)
            .with_condition("PIDPressure", True)
            .with_condition("MemoryPressure", True);

        assert_eq!(
            evaluate_node(&node).pressure_warnings,
            BTreeSet::from([
                PressureCondition::MemoryPressure,
                PressureCondition::PidPressure
            ])
        );
    }

    #[test]
    fn test_scenario_ready_with_memory_pressure() {
        let node = NodeSnapshot::new("n1")
            .with_condition("Ready", True)
            .with_condition("MemoryPressure", True)
            .with_label(INSTANCE_TYPE_LABEL, "m5.large");

        let verdict = evaluate_node(&node);
        assert_eq!(verdict.name, "n1");
        assert!(verdict.ready);
        assert_eq!(
            verdict.pressure_warnings,
            BTreeSet::from([PressureCondition::MemoryPressure])
        );
        assert_eq!(verdict.instance_type, "m5.large");
        assert_eq!(verdict.lifecycle, "On-Demand");
    }

    #[test]
    fn test_scenario_not_ready() {
        let verdict = evaluate_node(&NodeSnapshot::new("n2").with_condition("Ready", False));
        assert!(!verdict.ready);
        assert!(verdict.pressure_warnings.is_empty());
    }

    #[test]
    fn test_scenario_duplicate_ready() {
        let node = NodeSnapshot::new("n3")
            .with_condition("Ready", True)
            .with_condition("Ready", False);
        assert!(!evaluate_node(&node).ready);
    }

    #[test]
    fn test_lifecycle_defaults() {
        let test_cases = vec![
            (None, DEFAULT_LIFECYCLE),
            (Some(""), DEFAULT_LIFECYCLE),
            (Some("Ec2Spot"), "Ec2Spot"),
            (Some("preemptible"), "preemptible"),
        ];

        for (label, expected) in test_cases {
            let mut node = NodeSnapshot::new("node");
            if let Some(value) = label {
                node = node.with_label(LIFECYCLE_LABEL, value);
            }
            assert_eq!(
                evaluate_node(&node).lifecycle,
                expected,
                "Failed for label: {label:?}"
            );
        }
    }
}

mod pod_tests {
    use super::*;

    #[test]
    fn test_phase_classification() {
        let test_cases = vec![
            ("Running", PodStatus::Healthy),
            ("Pending", PodStatus::NeedsAttention),
            (
                "Succeeded",
                PodStatus::Unhealthy {
                    phase: "Succeeded".to_string(),
                },
            ),
            (
                "Failed",
                PodStatus::Unhealthy {
                    phase: "Failed".to_string(),
                },
            ),
            (
                "Unknown",
                PodStatus::Unhealthy {
                    phase: "Unknown".to_string(),
                },
            ),
            (
                "Terminating",
                PodStatus::Unhealthy {
                    phase: "Terminating".to_string(),
                },
            ),
        ];

        for (phase, expected) in test_cases {
            let verdict = evaluate_pod(&PodSnapshot::new("pod", "default", phase));
            assert_eq!(verdict.status, expected, "Failed for phase: {phase}");
        }
    }
}

mod report_tests {
    use super::*;

    fn write_snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_check_from_snapshot_file() {
        let file = write_snapshot(
            r#"{
                "nodes": [
                    {
                        "name": "n1",
                        "conditions": [
                            {"type": "Ready", "status": "True"},
                            {"type": "MemoryPressure", "status": "True"}
                        ],
                        "labels": {"node.kubernetes.io/instance-type": "m5.large"}
                    },
                    {"name": "n2", "conditions": [{"type": "Ready", "status": "False"}]}
                ],
                "pods": [
                    {"name": "p1", "namespace": "default", "phase": "Succeeded"},
                    {"name": "p2", "namespace": "default", "phase": "Running"},
                    {"name": "p3", "namespace": "kube-system", "phase": "Failed"}
                ]
            }"#,
        );

        let source = SnapshotFileSource::load(file.path()).unwrap();
        let report = run_check(&source, "default").await;

        let messages: Vec<String> = report
            .nodes
            .iter()
            .map(|n| n.status_message())
            .chain(report.pods.iter().map(|p| p.status_message()))
            .collect();
        assert_eq!(
            messages,
            vec![
                "Node n1 (m5.large, On-Demand) is Ready",
                "Node n2 is NOT Ready",
                "Pod p1 is Succeeded",
                "Pod p2 is Running",
            ]
        );
        assert_eq!(
            report.nodes[0].warning_messages(),
            vec!["WARNING: Node n1 has MemoryPressure!"]
        );
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_report_json() {
        let nodes = vec![NodeSnapshot::new("n1")
            .with_condition("Ready", True)
            .with_condition("DiskPressure", True)];
        let pods = vec![PodSnapshot::new("p1", "default", "Pending")];

        let report = HealthReport::evaluate("default", &nodes, &pods);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["namespace"], "default");
        assert_eq!(json["nodes"][0]["ready"], true);
        assert_eq!(json["nodes"][0]["pressure_warnings"][0], "DiskPressure");
        assert_eq!(json["nodes"][0]["lifecycle"], "On-Demand");
        assert_eq!(json["pods"][0]["status"], "needs_attention");
        assert!(json.get("node_fetch_error").is_none());
    }
}
