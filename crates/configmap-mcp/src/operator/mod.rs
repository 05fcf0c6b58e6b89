//! Resource operators.
//!
//! A `ResourceOperator` performs one CRUD operation for one resource kind. Handlers
//! never build operators directly; they go through an `OperatorFactory` so the
//! concrete backend can be swapped without touching dispatch code.

pub mod configmap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

use crate::{kubernetes::ClusterManager, params::ConfigMapParams, Result};

pub use configmap::ConfigMapOperator;

/// Executes operations for a single resource kind.
///
/// An operator is configured by its parameters at construction, used once and
/// dropped. Every call contacts the cluster independently.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceOperator: Send + Sync {
    /// Parameters this operator was built with.
    fn params(&self) -> &ConfigMapParams;

    async fn create(&self, cluster: Arc<dyn ClusterManager>) -> Result<String>;

    async fn get(&self, cluster: Arc<dyn ClusterManager>) -> Result<String>;

    async fn list(
        &self,
        cluster: Arc<dyn ClusterManager>,
        all_namespaces: bool,
        label_selector: String,
    ) -> Result<String>;

    async fn delete(&self, cluster: Arc<dyn ClusterManager>) -> Result<String>;

    /// Replaces every map field that was supplied and leaves the rest untouched.
    async fn update(&self, cluster: Arc<dyn ClusterManager>) -> Result<String>;
}

/// Builds operators from validated parameters. Construction cannot fail.
#[cfg_attr(test, automock)]
pub trait OperatorFactory: Send + Sync {
    fn build(&self, params: ConfigMapParams) -> Box<dyn ResourceOperator>;
}

/// Factory for the Kubernetes-backed ConfigMap operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigMapOperatorFactory;

impl OperatorFactory for ConfigMapOperatorFactory {
    fn build(&self, params: ConfigMapParams) -> Box<dyn ResourceOperator> {
        Box::new(ConfigMapOperator::new(params))
    }
}
