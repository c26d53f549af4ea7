//! Snapshot sources: the live cluster or a snapshot file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info};

use crate::error::Result;
use crate::snapshot::{ClusterSnapshot, NodeSnapshot, PodSnapshot};

/// Something that can list node and pod snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// List every node in the cluster.
    async fn list_nodes(&self) -> Result<Vec<NodeSnapshot>>;

    /// List the pods of a single namespace.
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSnapshot>>;
}

/// Live cluster source backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using an explicit kubeconfig, or kube's default chain
    /// (`KUBECONFIG`, `~/.kube/config`, in-cluster) when `kubeconfig` is `None`.
    pub async fn connect(kubeconfig: Option<&Path>) -> Result<Self> {
        let client = match kubeconfig {
            Some(path) => {
                info!(path = %path.display(), "Loading kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path)?;
                let config =
                    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                        .await?;
                Client::try_from(config)?
            }
            None => {
                debug!("Using default kubeconfig resolution");
                Client::try_default().await?
            }
        };
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ClusterSource for KubeSource {
    async fn list_nodes(&self) -> Result<Vec<NodeSnapshot>> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&ListParams::default()).await?;
        debug!(count = list.items.len(), "Listed nodes");

        list.items.iter().map(NodeSnapshot::try_from).collect()
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSnapshot>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods.list(&ListParams::default()).await?;
        debug!(namespace = %namespace, count = list.items.len(), "Listed pods");

        list.items.iter().map(PodSnapshot::try_from).collect()
    }
}

/// Offline source reading a JSON [`ClusterSnapshot`] document.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
    snapshot: ClusterSnapshot,
}

impl SnapshotFileSource {
    /// Read and validate a snapshot file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        let snapshot: ClusterSnapshot = serde_json::from_str(&content)?;
        snapshot.validate()?;

        info!(
            path = %path.display(),
            nodes = snapshot.nodes.len(),
            pods = snapshot.pods.len(),
            "Loaded cluster snapshot"
        );
        Ok(Self { path, snapshot })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ClusterSource for SnapshotFileSource {
    async fn list_nodes(&self) -> Result<Vec<NodeSnapshot>> {
        Ok(self.snapshot.nodes.clone())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSnapshot>> {
        Ok(self
            .snapshot
            .pods
            .iter()
            .filter(|pod| pod.namespace == namespace)
            .cloned()
            .collect())
    }
}
