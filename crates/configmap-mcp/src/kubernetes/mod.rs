//! Cluster context shared by every tool invocation.

use kube::Client;
#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::Result;

/// Ambient cluster context handed to every resource operator.
///
/// Shared across concurrent invocations, so implementations must be `Send + Sync`.
#[cfg_attr(test, automock)]
pub trait ClusterManager: Send + Sync {
    /// Namespace used when a caller does not name one. Never fails.
    fn current_namespace(&self) -> String;

    /// Client used to reach the API server.
    fn client(&self) -> Client;
}

/// `ClusterManager` backed by a real `kube::Client`.
#[derive(Clone)]
pub struct KubeClusterManager {
    client: Client,
    namespace: String,
}

impl KubeClusterManager {
    /// Connects using the local kubeconfig or the in-cluster service account.
    pub async fn new(namespace_override: Option<String>) -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self::from_client(client, namespace_override))
    }

    pub fn from_client(client: Client, namespace_override: Option<String>) -> Self {
        let namespace = namespace_override
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| client.default_namespace().to_string());

        info!("Using '{}' as the default namespace", namespace);

        Self { client, namespace }
    }
}

impl ClusterManager for KubeClusterManager {
    fn current_namespace(&self) -> String {
        self.namespace.clone()
    }

    fn client(&self) -> Client {
        self.client.clone()
    }
}
