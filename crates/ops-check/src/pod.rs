//! Pod health evaluation by phase.

use serde::{Deserialize, Serialize};

use crate::snapshot::PodSnapshot;

/// Classification of a pod's phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PodStatus {
    /// Phase is `Running`.
    Healthy,
    /// Phase is `Pending`; usually stuck scheduling or pulling an image.
    /// The pod's events hold the root cause.
    NeedsAttention,
    /// Any other phase, including `Succeeded`, `Failed` and `Unknown`.
    Unhealthy { phase: String },
}

impl PodStatus {
    #[must_use]
    pub fn from_phase(phase: &str) -> Self {
        match phase {
            "Running" => Self::Healthy,
            "Pending" => Self::NeedsAttention,
            other => Self::Unhealthy {
                phase: other.to_string(),
            },
        }
    }
}

/// Health verdict for a single pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodVerdict {
    pub name: String,
    pub namespace: String,
    #[serde(flatten)]
    pub status: PodStatus,
}

impl PodVerdict {
    #[must_use]
    pub fn status_message(&self) -> String {
        match &self.status {
            PodStatus::Healthy => format!("Pod {} is Running", self.name),
            PodStatus::NeedsAttention => format!("Pod {} is Pending (Check events!)", self.name),
            PodStatus::Unhealthy { phase } => format!("Pod {} is {}", self.name, phase),
        }
    }
}

/// Evaluate a pod snapshot. Phase matching is exact.
#[must_use]
pub fn evaluate_pod(pod: &PodSnapshot) -> PodVerdict {
    PodVerdict {
        name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        status: PodStatus::from_phase(&pod.phase),
    }
}
