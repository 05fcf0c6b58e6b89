//! Input schemas advertised for each tool.
//!
//! These types only describe the expected shape; decoding is done leniently by
//! `args` so that malformed optional fields can be dropped instead of failing.

use schemars::{schema_for, JsonSchema};
use serde_json::Value;
use std::collections::BTreeMap;

use super::messages::Operation;
use crate::Result;

#[allow(dead_code)]
#[derive(JsonSchema)]
struct NamedArgs {
    /// Name of the ConfigMap
    name: String,
    /// Namespace of the ConfigMap. Defaults to the current namespace
    namespace: Option<String>,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct WriteArgs {
    /// Name of the ConfigMap
    name: String,
    /// Namespace of the ConfigMap. Defaults to the current namespace
    namespace: Option<String>,
    /// Configuration data as key/value pairs
    data: Option<BTreeMap<String, Value>>,
    /// Binary data as key/base64-encoded value pairs
    binary_data: Option<BTreeMap<String, Value>>,
    /// Labels to set on the ConfigMap
    labels: Option<BTreeMap<String, Value>>,
    /// Annotations to set on the ConfigMap
    annotations: Option<BTreeMap<String, Value>>,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct ListArgs {
    /// List ConfigMaps across all namespaces
    all_namespaces: Option<bool>,
    /// Namespace to list. Defaults to the current namespace
    namespace: Option<String>,
    /// Label selector to filter by, e.g. `app=web,tier!=cache`
    label_selector: Option<String>,
}

/// JSON schema for the arguments of `operation`.
pub fn input_schema(operation: Operation) -> Result<Value> {
    let schema = match operation {
        Operation::Create | Operation::Update => schema_for!(WriteArgs),
        Operation::Get | Operation::Delete => schema_for!(NamedArgs),
        Operation::List => schema_for!(ListArgs),
    };
    Ok(serde_json::to_value(schema)?)
}
