//! Point-in-time node and pod snapshots.
//!
//! Snapshots are the only input the evaluators see. They are built either
//! from live Kubernetes objects (`TryFrom<&Node>`, `TryFrom<&Pod>`) or from a
//! snapshot file, and both paths enforce the same precondition: every object
//! carries a non-empty name.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Node, Pod};
use serde::{Deserialize, Serialize};

use crate::error::{OpsCheckError, Result};

/// Status value of a node condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    /// Anything the API reports other than exactly `True` or `False`.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ConditionStatus {
    /// Parse the raw status string. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "True" => Self::True,
            "False" => Self::False,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(type, status)` health signal reported by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCondition {
    /// Condition type: "Ready", "MemoryPressure", "DiskPressure", etc.
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
}

impl NodeCondition {
    #[must_use]
    pub fn new(condition_type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
        }
    }
}

/// One cluster node at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    /// Conditions in the order the API reported them.
    #[serde(default)]
    pub conditions: Vec<NodeCondition>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl NodeSnapshot {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a condition, keeping input order.
    #[must_use]
    pub fn with_condition(mut self, condition_type: &str, status: ConditionStatus) -> Self {
        self.conditions.push(NodeCondition::new(condition_type, status));
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    /// Check the well-formed precondition.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OpsCheckError::invalid_node("name must not be empty"));
        }
        Ok(())
    }
}

impl TryFrom<&Node> for NodeSnapshot {
    type Error = OpsCheckError;

    fn try_from(node: &Node) -> Result<Self> {
        let name = node
            .metadata
            .name
            .clone()
            .ok_or_else(|| OpsCheckError::invalid_node("metadata.name is missing"))?;

        let conditions = node
            .status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .map(|conds| {
                conds
                    .iter()
                    .map(|c| {
                        NodeCondition::new(&c.type_, ConditionStatus::from_raw(&c.status))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let snapshot = Self {
            name,
            conditions,
            labels: node.metadata.labels.clone().unwrap_or_default(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// One pod at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSnapshot {
    pub name: String,
    pub namespace: String,
    /// Raw phase string; empty when the API has not reported one yet.
    #[serde(default)]
    pub phase: String,
}

impl PodSnapshot {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            phase: phase.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OpsCheckError::invalid_pod("name must not be empty"));
        }
        Ok(())
    }
}

impl TryFrom<&Pod> for PodSnapshot {
    type Error = OpsCheckError;

    fn try_from(pod: &Pod) -> Result<Self> {
        let name = pod
            .metadata
            .name
            .clone()
            .ok_or_else(|| OpsCheckError::invalid_pod("metadata.name is missing"))?;

        let snapshot = Self {
            name,
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            phase: pod
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_default(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// A whole-cluster snapshot as stored in a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
    #[serde(default)]
    pub pods: Vec<PodSnapshot>,
}

impl ClusterSnapshot {
    pub fn validate(&self) -> Result<()> {
        for node in &self.nodes {
            node.validate()?;
        }
        for pod in &self.pods {
            pod.validate()?;
        }
        Ok(())
    }
}
