//! ConfigMap tools exposed to calling agents.

pub mod args;
pub mod handlers;
pub mod messages;
pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{kubernetes::ClusterManager, operator::OperatorFactory, Error, Result};

pub use args::Arguments;
pub use messages::Operation;

/// Name, description and input schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Definitions of every ConfigMap tool.
pub fn definitions() -> Result<Vec<ToolDefinition>> {
    Operation::ALL
        .into_iter()
        .map(|op| {
            Ok(ToolDefinition {
                name: op.tool_name().to_string(),
                description: op.description().to_string(),
                input_schema: schema::input_schema(op)?,
            })
        })
        .collect()
}

/// Binds tool names to their dispatch handlers.
#[derive(Clone)]
pub struct ToolRegistry {
    cluster: Arc<dyn ClusterManager>,
    factory: Arc<dyn OperatorFactory>,
}

impl ToolRegistry {
    pub fn new(cluster: Arc<dyn ClusterManager>, factory: Arc<dyn OperatorFactory>) -> Self {
        Self { cluster, factory }
    }

    pub fn definitions(&self) -> Result<Vec<ToolDefinition>> {
        definitions()
    }

    /// Invokes the named tool.
    ///
    /// Only an unknown tool name is an error; every outcome of a known tool,
    /// failures included, comes back as `Ok` text.
    pub async fn call(&self, name: &str, args: &Arguments) -> Result<String> {
        let operation =
            Operation::from_tool_name(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        debug!("Calling tool {}", name);
        Ok(handlers::dispatch(operation, args, self.cluster.clone(), self.factory.as_ref()).await)
    }
}
