//! Dispatch handlers, one per tool.
//!
//! Each handler runs the same pipeline: validate the name, resolve the
//! namespace, build the parameters, have the factory build an operator, invoke
//! it and render the outcome as text. Handlers never return an error value;
//! failures are reported through the returned text only.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::args::{
    optional_bool, optional_map, optional_string, required_name, string_or_default,
    ArgumentError, Arguments,
};
use super::messages::Operation;
use crate::{
    kubernetes::ClusterManager,
    metrics::{self, Outcome},
    operator::OperatorFactory,
    params::ConfigMapParams,
    Result,
};

/// Runs the handler matching `operation`.
pub async fn dispatch(
    operation: Operation,
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    match operation {
        Operation::Create => create_configmap(args, cluster, factory).await,
        Operation::Get => get_configmap(args, cluster, factory).await,
        Operation::List => list_configmaps(args, cluster, factory).await,
        Operation::Delete => delete_configmap(args, cluster, factory).await,
        Operation::Update => update_configmap(args, cluster, factory).await,
    }
}

pub async fn create_configmap(
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    let params = match writable_params(args, cluster.as_ref()) {
        Ok(params) => params,
        Err(err) => return reject(Operation::Create, err),
    };
    let resource = resource_of(&params);

    debug!(tool = Operation::Create.tool_name(), %resource, "Dispatching tool call");
    let operator = factory.build(params);
    render(Operation::Create, &resource, operator.create(cluster).await)
}

pub async fn get_configmap(
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    let params = match named_params(args, cluster.as_ref()) {
        Ok(params) => params,
        Err(err) => return reject(Operation::Get, err),
    };
    let resource = resource_of(&params);

    debug!(tool = Operation::Get.tool_name(), %resource, "Dispatching tool call");
    let operator = factory.build(params);
    render(Operation::Get, &resource, operator.get(cluster).await)
}

pub async fn list_configmaps(
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    let all_namespaces = optional_bool(args, "all_namespaces");
    let label_selector = string_or_default(args, "label_selector");

    // No namespace lookup across all namespaces.
    let namespace = if all_namespaces {
        String::new()
    } else {
        resolve_namespace(args, cluster.as_ref())
    };
    let params = ConfigMapParams {
        namespace,
        ..Default::default()
    };
    let resource = if all_namespaces {
        "*".to_string()
    } else {
        params.namespace.clone()
    };

    debug!(
        tool = Operation::List.tool_name(),
        %resource,
        %label_selector,
        "Dispatching tool call"
    );
    let operator = factory.build(params);
    let result = operator.list(cluster, all_namespaces, label_selector).await;
    render(Operation::List, &resource, result)
}

pub async fn delete_configmap(
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    let params = match named_params(args, cluster.as_ref()) {
        Ok(params) => params,
        Err(err) => return reject(Operation::Delete, err),
    };
    let resource = resource_of(&params);

    debug!(tool = Operation::Delete.tool_name(), %resource, "Dispatching tool call");
    let operator = factory.build(params);
    render(Operation::Delete, &resource, operator.delete(cluster).await)
}

pub async fn update_configmap(
    args: &Arguments,
    cluster: Arc<dyn ClusterManager>,
    factory: &dyn OperatorFactory,
) -> String {
    let params = match writable_params(args, cluster.as_ref()) {
        Ok(params) => params,
        Err(err) => return reject(Operation::Update, err),
    };
    let resource = resource_of(&params);

    debug!(tool = Operation::Update.tool_name(), %resource, "Dispatching tool call");
    let operator = factory.build(params);
    render(Operation::Update, &resource, operator.update(cluster).await)
}

/// The cluster's current namespace, overridden by an explicit non-empty argument.
/// The cluster is consulted even when the argument wins.
fn resolve_namespace(args: &Arguments, cluster: &dyn ClusterManager) -> String {
    let current = cluster.current_namespace();
    optional_string(args, "namespace").unwrap_or(current)
}

/// Name and namespace only, for get and delete.
fn named_params(
    args: &Arguments,
    cluster: &dyn ClusterManager,
) -> std::result::Result<ConfigMapParams, ArgumentError> {
    let name = required_name(args)?;
    let namespace = resolve_namespace(args, cluster);
    Ok(ConfigMapParams::new(name, namespace))
}

/// Name, namespace and whichever map fields are well-formed, for create and update.
fn writable_params(
    args: &Arguments,
    cluster: &dyn ClusterManager,
) -> std::result::Result<ConfigMapParams, ArgumentError> {
    let name = required_name(args)?;
    let namespace = resolve_namespace(args, cluster);
    Ok(ConfigMapParams {
        name,
        namespace,
        data: optional_map(args, "data"),
        binary_data: optional_map(args, "binary_data"),
        labels: optional_map(args, "labels"),
        annotations: optional_map(args, "annotations"),
    })
}

fn resource_of(params: &ConfigMapParams) -> String {
    format!("{}/{}", params.namespace, params.name)
}

fn reject(operation: Operation, err: ArgumentError) -> String {
    warn!(tool = operation.tool_name(), error = %err, "Rejected tool call");
    metrics::record_tool_call(operation.tool_name(), Outcome::Invalid);
    err.to_string()
}

fn render(operation: Operation, resource: &str, result: Result<String>) -> String {
    match result {
        Ok(text) => {
            info!(tool = operation.tool_name(), %resource, "Tool call succeeded");
            metrics::record_tool_call(operation.tool_name(), Outcome::Success);
            text
        }
        Err(err) => {
            warn!(tool = operation.tool_name(), %resource, error = %err, "Tool call failed");
            metrics::record_tool_call(operation.tool_name(), Outcome::Failure);
            operation.failure_message(&err)
        }
    }
}
