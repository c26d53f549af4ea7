//! Point-in-time cluster health evaluation.
//!
//! Classifies Kubernetes nodes and pods from a single snapshot:
//!
//! - **Nodes**: readiness (fail-closed, last `Ready` condition wins), active
//!   `MemoryPressure` / `DiskPressure` / `PIDPressure` warnings, and
//!   placement metadata (instance type, lifecycle tier).
//! - **Pods**: `Running` is healthy, `Pending` needs attention, anything
//!   else is unhealthy and keeps its phase string.
//!
//! The evaluators in [`node`] and [`pod`] are pure functions. Fetching lives
//! behind the [`ClusterSource`] trait, either a live cluster
//! ([`KubeSource`]) or a JSON snapshot file ([`SnapshotFileSource`]).
//!
//! ## Example
//!
//! ```
//! use ops_check::{evaluate_node, ConditionStatus, NodeSnapshot, PressureCondition};
//!
//! let node = NodeSnapshot::new("n1")
//!     .with_condition("Ready", ConditionStatus::True)
//!     .with_condition("MemoryPressure", ConditionStatus::True)
//!     .with_label("node.kubernetes.io/instance-type", "m5.large");
//!
//! let verdict = evaluate_node(&node);
//! assert!(verdict.ready);
//! assert!(verdict.pressure_warnings.contains(&PressureCondition::MemoryPressure));
//! assert_eq!(verdict.lifecycle, "On-Demand");
//! ```

pub mod check;
pub mod error;
pub mod node;
pub mod pod;
pub mod report;
pub mod snapshot;
pub mod source;

pub use check::run_check;
pub use error::{OpsCheckError, Result};
pub use node::{evaluate_node, NodeVerdict, PressureCondition};
pub use pod::{evaluate_pod, PodStatus, PodVerdict};
pub use report::{HealthReport, ReportSummary};
pub use snapshot::{ClusterSnapshot, ConditionStatus, NodeCondition, NodeSnapshot, PodSnapshot};
pub use source::{ClusterSource, KubeSource, SnapshotFileSource};
