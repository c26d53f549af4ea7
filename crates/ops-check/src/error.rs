//! Error types for the fetch and check layers.
//!
//! The evaluators themselves never fail; everything here comes from talking
//! to the control plane or from snapshots that violate the well-formed
//! precondition.

use thiserror::Error;

/// Errors that can occur while fetching or loading snapshots.
#[derive(Error, Debug)]
pub enum OpsCheckError {
    /// Kubernetes API request failed.
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Kubeconfig could not be read or resolved.
    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// Snapshot file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An object does not satisfy the snapshot precondition.
    #[error("Invalid {kind} snapshot: {reason}")]
    InvalidSnapshot { kind: &'static str, reason: String },
}

impl OpsCheckError {
    pub(crate) fn invalid_node(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            kind: "node",
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_pod(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            kind: "pod",
            reason: reason.into(),
        }
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, OpsCheckError>;
