//! Fixed response wording shared by every tool.
//!
//! Callers detect failures by matching these strings, so they must not drift.

use std::fmt::Display;

pub const MISSING_NAME: &str = "Missing required parameter: name";
pub const EMPTY_NAME: &str = "Parameter 'name' must be a non-empty string";

pub const FAILED_TO_CREATE: &str = "Failed to create ConfigMap: ";
pub const FAILED_TO_GET: &str = "Failed to get ConfigMap: ";
pub const FAILED_TO_LIST: &str = "Failed to list ConfigMap: ";
pub const FAILED_TO_DELETE: &str = "Failed to delete ConfigMap: ";
pub const FAILED_TO_UPDATE: &str = "Failed to update ConfigMap: ";

/// The five ConfigMap operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    List,
    Delete,
    Update,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Get,
        Operation::List,
        Operation::Delete,
        Operation::Update,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::Create => "create_configmap",
            Operation::Get => "get_configmap",
            Operation::List => "list_configmaps",
            Operation::Delete => "delete_configmap",
            Operation::Update => "update_configmap",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Create => "Create a new ConfigMap with optional data, binary data, labels and annotations",
            Operation::Get => "Get the current contents of a ConfigMap",
            Operation::List => "List ConfigMaps in a namespace or across all namespaces, optionally filtered by label selector",
            Operation::Delete => "Delete a ConfigMap",
            Operation::Update => "Update a ConfigMap. Each supplied field replaces the stored one; omitted fields are left untouched",
        }
    }

    pub fn failure_prefix(self) -> &'static str {
        match self {
            Operation::Create => FAILED_TO_CREATE,
            Operation::Get => FAILED_TO_GET,
            Operation::List => FAILED_TO_LIST,
            Operation::Delete => FAILED_TO_DELETE,
            Operation::Update => FAILED_TO_UPDATE,
        }
    }

    pub fn failure_message(self, err: &dyn Display) -> String {
        format!("{}{}", self.failure_prefix(), err)
    }

    /// Whether the tool requires a `name` argument.
    pub fn requires_name(self) -> bool {
        !matches!(self, Operation::List)
    }
}
