//! Kubernetes-backed ConfigMap operator.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use k8s_openapi::{api::core::v1::ConfigMap, ByteString};
use kube::api::{Api, DeleteParams, ListParams, ObjectMeta, PostParams, ResourceExt};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::ResourceOperator;
use crate::{
    kubernetes::ClusterManager,
    params::{ConfigMapParams, ValueMap},
    Error, Result,
};

pub struct ConfigMapOperator {
    params: ConfigMapParams,
}

impl ConfigMapOperator {
    pub fn new(params: ConfigMapParams) -> Self {
        Self { params }
    }

    fn api(&self, cluster: &dyn ClusterManager) -> Api<ConfigMap> {
        Api::namespaced(cluster.client(), &self.params.namespace)
    }

    /// Manifest for a new ConfigMap. Absent maps become empty ones.
    fn build_config_map(&self) -> Result<ConfigMap> {
        Ok(ConfigMap {
            metadata: ObjectMeta {
                name: Some(self.params.name.clone()),
                namespace: Some(self.params.namespace.clone()),
                labels: self.params.labels.as_ref().map(to_string_map),
                annotations: self.params.annotations.as_ref().map(to_string_map),
                ..Default::default()
            },
            data: Some(self.params.data.as_ref().map(to_string_map).unwrap_or_default()),
            binary_data: self
                .params
                .binary_data
                .as_ref()
                .map(to_byte_map)
                .transpose()?,
            ..Default::default()
        })
    }

    /// Overwrites each supplied field of `existing` wholesale.
    fn apply_update(&self, existing: &mut ConfigMap) -> Result<()> {
        if let Some(data) = &self.params.data {
            existing.data = Some(to_string_map(data));
        }
        if let Some(binary_data) = &self.params.binary_data {
            existing.binary_data = Some(to_byte_map(binary_data)?);
        }
        if let Some(labels) = &self.params.labels {
            existing.metadata.labels = Some(to_string_map(labels));
        }
        if let Some(annotations) = &self.params.annotations {
            existing.metadata.annotations = Some(to_string_map(annotations));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceOperator for ConfigMapOperator {
    fn params(&self) -> &ConfigMapParams {
        &self.params
    }

    async fn create(&self, cluster: Arc<dyn ClusterManager>) -> Result<String> {
        let config_map = self.build_config_map()?;
        let api = self.api(cluster.as_ref());

        api.create(&PostParams::default(), &config_map).await?;
        info!("Created ConfigMap {}/{}", self.params.namespace, self.params.name);

        Ok(format!(
            "ConfigMap \"{}\" created successfully in namespace \"{}\"",
            self.params.name, self.params.namespace
        ))
    }

    async fn get(&self, cluster: Arc<dyn ClusterManager>) -> Result<String> {
        let config_map = self.api(cluster.as_ref()).get(&self.params.name).await?;
        Ok(describe(&config_map))
    }

    async fn list(
        &self,
        cluster: Arc<dyn ClusterManager>,
        all_namespaces: bool,
        label_selector: String,
    ) -> Result<String> {
        let api: Api<ConfigMap> = if all_namespaces {
            Api::all(cluster.client())
        } else {
            self.api(cluster.as_ref())
        };

        let mut list_params = ListParams::default();
        if !label_selector.is_empty() {
            list_params = list_params.labels(&label_selector);
        }

        let config_maps = api.list(&list_params).await?;
        debug!(
            "Listed {} ConfigMaps (all_namespaces={}, selector='{}')",
            config_maps.items.len(),
            all_namespaces,
            label_selector
        );

        let scope = (!all_namespaces).then_some(self.params.namespace.as_str());
        Ok(render_list(&config_maps.items, scope, Utc::now()))
    }

    async fn delete(&self, cluster: Arc<dyn ClusterManager>) -> Result<String> {
        self.api(cluster.as_ref())
            .delete(&self.params.name, &DeleteParams::default())
            .await?;
        info!("Deleted ConfigMap {}/{}", self.params.namespace, self.params.name);

        Ok(format!(
            "ConfigMap \"{}\" deleted successfully from namespace \"{}\"",
            self.params.name, self.params.namespace
        ))
    }

    async fn update(&self, cluster: Arc<dyn ClusterManager>) -> Result<String> {
        let api = self.api(cluster.as_ref());

        // Replace rather than patch so the server enforces resourceVersion.
        let mut config_map = api.get(&self.params.name).await?;
        self.apply_update(&mut config_map)?;
        api.replace(&self.params.name, &PostParams::default(), &config_map)
            .await?;
        info!("Updated ConfigMap {}/{}", self.params.namespace, self.params.name);

        Ok(format!(
            "ConfigMap \"{}\" updated successfully in namespace \"{}\"",
            self.params.name, self.params.namespace
        ))
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn to_string_map(map: &ValueMap) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| (key.clone(), value_to_string(value)))
        .collect()
}

/// Decodes caller-supplied base64 strings into raw bytes.
fn to_byte_map(map: &ValueMap) -> Result<BTreeMap<String, ByteString>> {
    map.iter()
        .map(|(key, value)| {
            let encoded = value.as_str().ok_or_else(|| {
                Error::InvalidInput(format!("binary_data key \"{}\" must be a base64 string", key))
            })?;
            let bytes = STANDARD.decode(encoded).map_err(|e| {
                Error::InvalidInput(format!(
                    "binary_data key \"{}\" is not valid base64: {}",
                    key, e
                ))
            })?;
            Ok((key.clone(), ByteString(bytes)))
        })
        .collect()
}

fn join_pairs(map: Option<&BTreeMap<String, String>>) -> String {
    match map {
        Some(map) if !map.is_empty() => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "<none>".to_string(),
    }
}

fn describe(config_map: &ConfigMap) -> String {
    let mut lines = vec![
        format!(
            "ConfigMap \"{}\" in namespace \"{}\":",
            config_map.name_any(),
            config_map.namespace().unwrap_or_default()
        ),
        format!("Labels: {}", join_pairs(config_map.metadata.labels.as_ref())),
        format!(
            "Annotations: {}",
            join_pairs(config_map.metadata.annotations.as_ref())
        ),
        "Data:".to_string(),
    ];

    match &config_map.data {
        Some(data) if !data.is_empty() => {
            lines.extend(data.iter().map(|(k, v)| format!("  {}={}", k, v)));
        }
        _ => lines.push("  <none>".to_string()),
    }

    lines.push("BinaryData:".to_string());
    match &config_map.binary_data {
        Some(binary) if !binary.is_empty() => {
            lines.extend(
                binary
                    .iter()
                    .map(|(k, v)| format!("  {}: {} bytes", k, v.0.len())),
            );
        }
        _ => lines.push("  <none>".to_string()),
    }

    lines.join("\n")
}

/// kubectl-style table. `namespace` is `None` when listing every namespace.
fn render_list(items: &[ConfigMap], namespace: Option<&str>, now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return match namespace {
            Some(ns) => format!("No ConfigMaps found in namespace \"{}\"", ns),
            None => "No ConfigMaps found in any namespace".to_string(),
        };
    }

    let rows: Vec<String> = items
        .iter()
        .map(|cm| {
            let keys = cm.data.as_ref().map_or(0, |d| d.len())
                + cm.binary_data.as_ref().map_or(0, |d| d.len());
            let age = cm
                .metadata
                .creation_timestamp
                .as_ref()
                .map(|t| format_age(now.signed_duration_since(t.0)))
                .unwrap_or_else(|| "<unknown>".to_string());

            match namespace {
                Some(_) => format!("{}\t{}\t{}", cm.name_any(), keys, age),
                None => format!(
                    "{}\t{}\t{}\t{}",
                    cm.namespace().unwrap_or_default(),
                    cm.name_any(),
                    keys,
                    age
                ),
            }
        })
        .collect();

    let header = match namespace {
        Some(_) => "NAME\tDATA\tAGE",
        None => "NAMESPACE\tNAME\tDATA\tAGE",
    };
    format!("{}\n{}", header, rows.join("\n"))
}

fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}
