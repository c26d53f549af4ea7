//! Node health evaluation.
//!
//! Turns a [`NodeSnapshot`] into a [`NodeVerdict`]: readiness, the set of
//! active pressure conditions, and placement metadata (instance type and
//! lifecycle tier). Evaluation is a pure function of the snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::snapshot::{ConditionStatus, NodeSnapshot};

/// Condition type that carries node readiness.
pub const READY_CONDITION: &str = "Ready";

/// Well-known label holding the cloud instance type.
pub const INSTANCE_TYPE_LABEL: &str = "node.kubernetes.io/instance-type";

/// Label distinguishing spot/preemptible capacity from on-demand capacity.
pub const LIFECYCLE_LABEL: &str = "lifecycle";

/// Lifecycle reported when the node carries no lifecycle label.
pub const DEFAULT_LIFECYCLE: &str = "On-Demand";

/// Resource pressure conditions surfaced as warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PressureCondition {
    MemoryPressure,
    DiskPressure,
    #[serde(rename = "PIDPressure")]
    PidPressure,
}

impl PressureCondition {
    pub const ALL: [Self; 3] = [Self::MemoryPressure, Self::DiskPressure, Self::PidPressure];

    /// Condition type string as reported by the kubelet.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MemoryPressure => "MemoryPressure",
            Self::DiskPressure => "DiskPressure",
            Self::PidPressure => "PIDPressure",
        }
    }

    /// Map a condition type to a pressure kind. Other types yield `None`.
    #[must_use]
    pub fn from_condition_type(condition_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == condition_type)
    }
}

impl std::fmt::Display for PressureCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health verdict for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVerdict {
    pub name: String,
    pub ready: bool,
    pub pressure_warnings: BTreeSet<PressureCondition>,
    /// Empty when the instance-type label is absent.
    pub instance_type: String,
    pub lifecycle: String,
}

impl NodeVerdict {
    /// Whether any pressure condition is active.
    #[must_use]
    pub fn under_pressure(&self) -> bool {
        !self.pressure_warnings.is_empty()
    }

    /// Readiness line, e.g. `Node n1 (m5.large, On-Demand) is Ready`.
    #[must_use]
    pub fn status_message(&self) -> String {
        if self.ready {
            format!(
                "Node {} ({}, {}) is Ready",
                self.name, self.instance_type, self.lifecycle
            )
        } else {
            format!("Node {} is NOT Ready", self.name)
        }
    }

    /// One warning line per active pressure condition.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.pressure_warnings
            .iter()
            .map(|p| format!("WARNING: Node {} has {}!", self.name, p))
            .collect()
    }
}

/// Evaluate a node snapshot.
///
/// Readiness is a fold over the conditions in input order: every `Ready`
/// entry overwrites the running value, so a duplicated `Ready` condition
/// resolves to the last one. With no `Ready` entry the value stays
/// `Unknown`, which is reported as not ready.
#[must_use]
pub fn evaluate_node(node: &NodeSnapshot) -> NodeVerdict {
    let readiness = node
        .conditions
        .iter()
        .fold(ConditionStatus::Unknown, |current, cond| {
            if cond.condition_type == READY_CONDITION {
                cond.status
            } else {
                current
            }
        });

    let pressure_warnings = node
        .conditions
        .iter()
        .filter(|cond| cond.status == ConditionStatus::True)
        .filter_map(|cond| PressureCondition::from_condition_type(&cond.condition_type))
        .collect();

    let instance_type = node
        .labels
        .get(INSTANCE_TYPE_LABEL)
        .cloned()
        .unwrap_or_default();

    let lifecycle = node
        .labels
        .get(LIFECYCLE_LABEL)
        .filter(|value| !value.is_empty())
        .map_or_else(|| DEFAULT_LIFECYCLE.to_string(), Clone::clone);

    NodeVerdict {
        name: node.name.clone(),
        ready: readiness == ConditionStatus::True,
        pressure_warnings,
        instance_type,
        lifecycle,
    }
}
